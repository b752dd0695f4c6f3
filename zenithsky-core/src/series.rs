use serde::Serialize;

use crate::model::Forecast;

pub const CHART_TITLE: &str = "Weather Data Analysis";
pub const X_AXIS_LABEL: &str = "Date";
pub const Y_AXIS_LABEL: &str = "Values";
pub const TEMPERATURE_LABEL: &str = "Temperature (°C)";
pub const HUMIDITY_LABEL: &str = "Humidity (%)";
pub const WIND_SPEED_LABEL: &str = "Wind Speed (kph)";

/// Index-aligned chart series: entry `i` of every field describes the same day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesBundle {
    pub dates: Vec<String>,
    pub temperatures: Vec<f64>,
    pub humidities: Vec<f64>,
    pub wind_speeds: Vec<f64>,
}

impl SeriesBundle {
    pub fn extract(forecast: &Forecast) -> Self {
        let n = forecast.days.len();
        let mut bundle = Self {
            dates: Vec::with_capacity(n),
            temperatures: Vec::with_capacity(n),
            humidities: Vec::with_capacity(n),
            wind_speeds: Vec::with_capacity(n),
        };

        for day in &forecast.days {
            bundle.dates.push(day.date.to_string());
            bundle.temperatures.push(day.avg_temp_c);
            bundle.humidities.push(day.avg_humidity_pct);
            bundle.wind_speeds.push(day.max_wind_kph);
        }

        bundle
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Smallest and largest value across the three numeric series.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.temperatures
            .iter()
            .chain(&self.humidities)
            .chain(&self.wind_speeds)
            .copied()
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// `(x, y)` points for one series, with the day index as `x`.
    pub fn points(values: &[f64]) -> Vec<(f64, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }
}

pub fn extract_series(forecast: &Forecast) -> SeriesBundle {
    SeriesBundle::extract(forecast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DayRecord;
    use chrono::NaiveDate;

    fn forecast(n: u32) -> Forecast {
        Forecast {
            location_name: "Paris".to_string(),
            days: (0..n)
                .map(|i| DayRecord {
                    date: NaiveDate::from_ymd_opt(2024, 7, 1 + i).unwrap(),
                    avg_temp_c: -2.5 + i as f64,
                    condition: "Sunny".to_string(),
                    avg_humidity_pct: 40.0 + i as f64 * 10.0,
                    max_wind_kph: 5.0 * i as f64,
                })
                .collect(),
        }
    }

    #[test]
    fn series_are_aligned_and_sized_like_the_forecast() {
        for n in [0, 1, 3, 5] {
            let bundle = extract_series(&forecast(n));
            let n = n as usize;
            assert_eq!(bundle.len(), n);
            assert_eq!(bundle.temperatures.len(), n);
            assert_eq!(bundle.humidities.len(), n);
            assert_eq!(bundle.wind_speeds.len(), n);
        }
    }

    #[test]
    fn index_describes_same_day() {
        let bundle = SeriesBundle::extract(&forecast(5));

        assert_eq!(bundle.dates[2], "2024-07-03");
        assert_eq!(bundle.temperatures[2], -0.5);
        assert_eq!(bundle.humidities[2], 60.0);
        assert_eq!(bundle.wind_speeds[2], 10.0);
    }

    #[test]
    fn extraction_is_idempotent() {
        let f = forecast(5);
        assert_eq!(SeriesBundle::extract(&f), SeriesBundle::extract(&f));
    }

    #[test]
    fn value_bounds_span_all_series() {
        let bundle = SeriesBundle::extract(&forecast(5));
        assert_eq!(bundle.value_bounds(), Some((-2.5, 80.0)));
        assert_eq!(SeriesBundle::default().value_bounds(), None);
        assert!(SeriesBundle::default().is_empty());
    }

    #[test]
    fn points_use_day_index_as_x() {
        assert_eq!(
            SeriesBundle::points(&[3.0, 4.5]),
            vec![(0.0, 3.0), (1.0, 4.5)]
        );
    }
}
