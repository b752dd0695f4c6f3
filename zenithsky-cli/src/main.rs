//! Binary crate for the `zenithsky` weather app.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - The terminal window: input, summary, busy indicator and chart

use clap::Parser;

mod cli;
mod input;
mod logging;
mod tui;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
