use crate::model::Forecast;

const DIVIDER_WIDTH: usize = 30;

/// Render a forecast as the multi-line summary shown in the text area.
///
/// A `Weather in {location}:` header is followed by one block per day, each closed by a
/// divider line. Values are printed as received, never rounded.
pub fn format_forecast(forecast: &Forecast) -> String {
    let mut out = format!("Weather in {}:\n", forecast.location_name);
    let divider = "-".repeat(DIVIDER_WIDTH);

    for day in &forecast.days {
        out.push_str(&format!(
            "\nDate: {}\nTemperature: {}°C\nDescription: {}\nHumidity: {}%\nWind Speed: {} kph\n",
            day.date,
            number(day.avg_temp_c),
            day.condition,
            number(day.avg_humidity_pct),
            number(day.max_wind_kph),
        ));
        out.push_str(&divider);
    }

    out
}

/// Shortest exact form of `value`, keeping one decimal on whole numbers (`20.0`, `23.75`).
fn number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
