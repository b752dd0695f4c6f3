use chrono::{DateTime, Local};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Wrap},
};
use zenithsky_core::{
    BusyIndicator, SeriesBundle, View,
    series::{
        CHART_TITLE, HUMIDITY_LABEL, TEMPERATURE_LABEL, WIND_SPEED_LABEL, X_AXIS_LABEL,
        Y_AXIS_LABEL,
    },
};

pub const WINDOW_TITLE: &str = "ZenithSky Weather App";
const KEY_HINTS: &str = "Enter: get weather   F5/Ctrl-R: refresh data   Ctrl-U: clear   Esc: quit";

/// Everything one frame needs.
pub struct Screen<'a> {
    pub input: &'a str,
    pub view: &'a View,
    pub busy_visible: bool,
    pub updated_at: Option<DateTime<Local>>,
}

pub fn draw(f: &mut Frame, screen: &Screen) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(8),
        ])
        .split(f.area());

    render_title(f, rows[0], screen);
    render_input(f, rows[1], screen);
    f.render_widget(
        Paragraph::new(KEY_HINTS).style(Style::default().fg(Color::DarkGray)),
        rows[2],
    );
    render_status(f, rows[3], screen);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[4]);

    render_summary(f, body[0], screen.view);
    render_chart(f, body[1], screen.view.series.as_ref());
}

fn render_title(f: &mut Frame, area: Rect, screen: &Screen) {
    let mut spans = vec![Span::styled(
        WINDOW_TITLE,
        Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
    )];
    if let Some(at) = screen.updated_at {
        spans.push(Span::raw(format!("   updated {}", at.format("%H:%M"))));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(f: &mut Frame, area: Rect, screen: &Screen) {
    let block = Block::default().borders(Borders::ALL).title("City");
    f.render_widget(
        Paragraph::new(format!("{}_", screen.input)).block(block),
        area,
    );
}

fn render_status(f: &mut Frame, area: Rect, screen: &Screen) {
    let line = match (&screen.view.error, screen.busy_visible) {
        (Some(err), _) => Line::styled(err.as_str(), Style::default().fg(Color::Red)),
        (None, true) => Line::styled(BusyIndicator::LABEL, Style::default().fg(Color::Yellow)),
        (None, false) => Line::default(),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_summary(f: &mut Frame, area: Rect, view: &View) {
    let block = Block::default().borders(Borders::ALL).title("Forecast");
    let summary = Paragraph::new(view.summary.as_str())
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(summary, area);
}

fn render_chart(f: &mut Frame, area: Rect, series: Option<&SeriesBundle>) {
    let block = Block::default().borders(Borders::ALL).title(CHART_TITLE);

    let Some(series) = series.filter(|s| !s.is_empty()) else {
        f.render_widget(
            Paragraph::new("No forecast loaded yet. Type a city and press Enter.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    };

    let temperatures = SeriesBundle::points(&series.temperatures);
    let humidities = SeriesBundle::points(&series.humidities);
    let wind_speeds = SeriesBundle::points(&series.wind_speeds);

    let datasets = vec![
        dataset(TEMPERATURE_LABEL, Color::Blue, &temperatures),
        dataset(HUMIDITY_LABEL, Color::Green, &humidities),
        dataset(WIND_SPEED_LABEL, Color::Red, &wind_speeds),
    ];

    let (lo, hi) = series.value_bounds().unwrap_or((0.0, 1.0));
    let pad = ((hi - lo) * 0.1).max(1.0);
    let (y_min, y_max) = (lo - pad, hi + pad);
    let x_max = (series.len().saturating_sub(1)).max(1) as f64;

    // Dates are YYYY-MM-DD; MM-DD keeps five labels readable.
    let x_labels: Vec<Span> = series
        .dates
        .iter()
        .map(|d| Span::raw(d.get(5..).unwrap_or(d).to_string()))
        .collect();
    let y_labels: Vec<Span> = [y_min, (y_min + y_max) / 2.0, y_max]
        .iter()
        .map(|v| Span::raw(format!("{v:.0}")))
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .legend_position(Some(LegendPosition::TopRight))
        .x_axis(
            Axis::default()
                .title(X_AXIS_LABEL)
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Y_AXIS_LABEL)
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn dataset<'a>(name: &'a str, color: Color, data: &'a [(f64, f64)]) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(screen: &Screen) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, screen)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn screen<'a>(input: &'a str, view: &'a View, busy_visible: bool) -> Screen<'a> {
        Screen {
            input,
            view,
            busy_visible,
            updated_at: None,
        }
    }

    fn series() -> SeriesBundle {
        SeriesBundle {
            dates: (25..30).map(|d| format!("2024-07-{d}")).collect(),
            temperatures: vec![21.0, 19.0, 23.0, 25.0, 18.0],
            humidities: vec![54.0, 81.0, 47.0, 60.0, 88.0],
            wind_speeds: vec![12.0, 20.0, 9.0, 14.0, 27.0],
        }
    }

    #[test]
    fn empty_window_shows_title_and_placeholder() {
        let view = View::default();
        let text = render(&screen("", &view, false));

        assert!(text.contains(WINDOW_TITLE));
        assert!(text.contains("No forecast loaded yet"));
        assert!(!text.contains(BusyIndicator::LABEL));
    }

    #[test]
    fn busy_marker_follows_flag() {
        let view = View::default();
        let text = render(&screen("Paris", &view, true));

        assert!(text.contains("Paris_"));
        assert!(text.contains(BusyIndicator::LABEL));
    }

    #[test]
    fn error_is_shown_instead_of_busy_marker() {
        let view = View {
            error: Some("City not found.".to_string()),
            ..View::default()
        };
        let text = render(&screen("Atlantis", &view, true));

        assert!(text.contains("City not found."));
        assert!(!text.contains(BusyIndicator::LABEL));
    }

    #[test]
    fn forecast_renders_summary_and_chart() {
        let view = View {
            summary: "Weather in Paris:\n\nDate: 2024-07-25".to_string(),
            error: None,
            series: Some(series()),
        };
        let text = render(&screen("Paris", &view, false));

        assert!(text.contains("Weather in Paris:"));
        assert!(text.contains(CHART_TITLE));
        assert!(text.contains("07-25"));
        assert!(!text.contains("No forecast loaded yet"));
    }
}
