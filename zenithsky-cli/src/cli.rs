use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Password;
use zenithsky_core::{
    Config, ForecastProvider, ForecastQuery, format_forecast, provider_from_config,
};

use crate::{logging, tui};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "zenithsky", version, about = "ZenithSky weather forecast")]
pub struct Cli {
    /// Defaults to `tui` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive forecast window.
    Tui {
        /// Search for this city right away.
        #[arg(long)]
        city: Option<String>,
    },

    /// Store the WeatherAPI.com key in the config file.
    Configure,

    /// Print the forecast summary for a city and exit.
    Show {
        /// City name, e.g. "Paris".
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Tui { city: None }) {
            Command::Configure => {
                logging::init_stderr();
                configure()
            }
            Command::Show { city } => {
                logging::init_stderr();
                show(&city).await
            }
            Command::Tui { city } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                let log_path = logging::init_file()?;
                tracing::info!(log = %log_path.display(), "starting interactive window");
                tui::run(&config, provider, city).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .with_help_message("Get a free key at https://www.weatherapi.com/")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    if config.api_key.is_none() {
        anyhow::bail!("API key must not be empty");
    }
    config.save()?;

    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

async fn show(city: &str) -> anyhow::Result<()> {
    let query = ForecastQuery::new(city)?;
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let forecast = provider.fetch(&query).await?;
    println!("{}", format_forecast(&forecast));
    Ok(())
}
