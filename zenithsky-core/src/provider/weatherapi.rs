use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    error::ErrorKind,
    model::{DayRecord, Forecast, ForecastQuery, ForecastResult},
};

use super::ForecastProvider;

/// Error codes WeatherAPI.com uses for a missing, invalid, exhausted or disabled key.
const API_KEY_ERROR_CODES: &[i64] = &[1002, 2006, 2007, 2008];

/// Client for the WeatherAPI.com `forecast.json` endpoint.
#[derive(Clone)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    days: u8,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        days: u8,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for WeatherAPI.com")?;

        Ok(Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            days: days.max(1),
            http,
        })
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url)
    }
}

impl std::fmt::Debug for WeatherApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiClient")
            .field("base_url", &self.base_url)
            .field("days", &self.days)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiClient {
    async fn fetch(&self, query: &ForecastQuery) -> ForecastResult {
        let days = self.days.to_string();

        debug!(city = %query, days = self.days, "requesting forecast");

        let res = self
            .http
            .get(self.forecast_url())
            .query(&[
                ("q", query.city()),
                ("key", self.api_key.as_str()),
                ("days", days.as_str()),
            ])
            .send()
            .await
            .map_err(|err| {
                // The URL carries the API key.
                let err = err.without_url();
                warn!(
                    city = %query,
                    timeout = err.is_timeout(),
                    error = %err,
                    "forecast request failed"
                );
                ErrorKind::NetworkFailure
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|err| {
            warn!(
                city = %query,
                %status,
                error = %err.without_url(),
                "failed to read forecast body"
            );
            ErrorKind::NetworkFailure
        })?;

        let result = parse_forecast_body(status, &body);
        match &result {
            Ok(forecast) => info!(
                city = %query,
                location = %forecast.location_name,
                days = forecast.days.len(),
                "forecast received"
            ),
            Err(kind) => warn!(
                city = %query,
                %status,
                kind = kind.as_str(),
                body = %truncate_body(&body),
                "forecast rejected"
            ),
        }
        result
    }
}

/// Classify a `forecast.json` answer.
///
/// An `error` member wins over the status code because unknown locations come back as HTTP 400.
pub fn parse_forecast_body(status: StatusCode, body: &str) -> ForecastResult {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => return Err(ErrorKind::NetworkFailure),
        Err(_) => return Err(ErrorKind::ParseFailure),
    };

    if let Some(error) = value.get("error") {
        return Err(classify_error_payload(error));
    }

    if !status.is_success() {
        return Err(ErrorKind::NetworkFailure);
    }

    let parsed: WaForecastResponse =
        serde_json::from_value(value).map_err(|_| ErrorKind::ParseFailure)?;

    parsed.into_forecast()
}

fn classify_error_payload(error: &Value) -> ErrorKind {
    let code = error.get("code").and_then(Value::as_i64);
    match code {
        Some(code) if API_KEY_ERROR_CODES.contains(&code) => ErrorKind::ApiKeyRejected,
        _ => ErrorKind::LocationNotFound,
    }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_c: f64,
    avghumidity: f64,
    maxwind_kph: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    forecast: WaForecast,
}

impl WaForecastResponse {
    fn into_forecast(self) -> ForecastResult {
        if self.forecast.forecastday.is_empty() {
            return Err(ErrorKind::ParseFailure);
        }

        let days = self
            .forecast
            .forecastday
            .into_iter()
            .map(WaForecastDay::into_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Forecast {
            location_name: self.location.name,
            days,
        })
    }
}

impl WaForecastDay {
    fn into_record(self) -> Result<DayRecord, ErrorKind> {
        let WaDay {
            avgtemp_c,
            avghumidity,
            maxwind_kph,
            condition,
        } = self.day;

        let humidity_ok = avghumidity.is_finite() && (0.0..=100.0).contains(&avghumidity);
        let wind_ok = maxwind_kph.is_finite() && maxwind_kph >= 0.0;
        if !humidity_ok || !wind_ok || !avgtemp_c.is_finite() {
            return Err(ErrorKind::ParseFailure);
        }

        Ok(DayRecord {
            date: self.date,
            avg_temp_c: avgtemp_c,
            condition: condition.text,
            avg_humidity_pct: avghumidity,
            max_wind_kph: maxwind_kph,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
