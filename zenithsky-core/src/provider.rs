use crate::{
    Config,
    model::{ForecastQuery, ForecastResult},
    provider::weatherapi::WeatherApiClient,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod weatherapi;

/// Source of multi-day forecasts.
///
/// Implementations perform exactly one outbound request per call, never retry,
/// and classify every failure into an [`ErrorKind`](crate::ErrorKind).
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn fetch(&self, query: &ForecastQuery) -> ForecastResult;
}

/// Construct the WeatherAPI.com client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn ForecastProvider>> {
    let api_key = config.resolve_api_key()?;

    let client = WeatherApiClient::new(
        api_key,
        config.base_url.clone(),
        config.forecast_days,
        config.request_timeout(),
    )?;

    Ok(Arc::new(client))
}
