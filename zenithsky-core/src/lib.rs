//! Core library for the ZenithSky weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The forecast provider abstraction and the WeatherAPI.com client
//! - Formatting a forecast as text and extracting chart series from it
//! - Refresh timers, the fetch state machine and the presentation controller
//!
//! It has no terminal or windowing code; `zenithsky-cli` draws what the
//! controller exposes.

pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod scheduler;
pub mod series;

pub use config::Config;
pub use controller::{Completion, Event, PresentationController, View};
pub use error::ErrorKind;
pub use format::format_forecast;
pub use model::{DayRecord, Forecast, ForecastQuery, ForecastResult};
pub use provider::{ForecastProvider, provider_from_config};
pub use scheduler::{BusyIndicator, FetchState, RefreshScheduler};
pub use series::{SeriesBundle, extract_series};
