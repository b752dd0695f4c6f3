use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

/// Outcome of one fetch. Produced once per query and replaced wholesale by the next one.
pub type ForecastResult = Result<Forecast, ErrorKind>;

/// A city name that has been checked to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastQuery {
    city: String,
}

impl ForecastQuery {
    /// Surrounding whitespace is dropped; nothing left means `ErrorKind::Validation`.
    pub fn new(city: &str) -> Result<Self, ErrorKind> {
        let city = city.trim();
        if city.is_empty() {
            return Err(ErrorKind::Validation);
        }

        Ok(Self {
            city: city.to_string(),
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for ForecastQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.city)
    }
}

/// Multi-day forecast for one location, days in ascending date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub location_name: String,
    pub days: Vec<DayRecord>,
}

/// One day's summary within a [`Forecast`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub avg_temp_c: f64,
    pub condition: String,
    /// Percentage, 0–100.
    pub avg_humidity_pct: f64,
    pub max_wind_kph: f64,
}
