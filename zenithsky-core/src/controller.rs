//! Orchestration between user intent, the forecast provider and what is displayed.
//!
//! The controller is the single writer of [`View`]. Fetches run on spawned tasks and
//! report back through the event queue, so the UI loop is never blocked on the network.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

use crate::{
    error::ErrorKind,
    format::format_forecast,
    model::{ForecastQuery, ForecastResult},
    provider::ForecastProvider,
    scheduler::{BusyIndicator, FetchState},
    series::SeriesBundle,
};

/// Result of one dispatched fetch, tagged with the sequence number it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub seq: u64,
    pub result: ForecastResult,
}

/// Everything the UI loop feeds back into the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Auto-refresh timer fired.
    Refresh,
    /// Busy indicator timer fired.
    Blink,
    Completed(Completion),
}

/// What the window currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    pub summary: String,
    pub error: Option<String>,
    pub series: Option<SeriesBundle>,
}

#[derive(Debug)]
pub struct PresentationController {
    provider: Arc<dyn ForecastProvider>,
    events: UnboundedSender<Event>,
    city: String,
    last_seq: u64,
    state: FetchState,
    busy: BusyIndicator,
    view: View,
}

impl PresentationController {
    pub fn new(provider: Arc<dyn ForecastProvider>, events: UnboundedSender<Event>) -> Self {
        Self {
            provider,
            events,
            city: String::new(),
            last_seq: 0,
            state: FetchState::Idle,
            busy: BusyIndicator::default(),
            view: View::default(),
        }
    }

    /// Search for `city`, which also becomes the city used by later refreshes.
    ///
    /// Returns `true` when a request was dispatched.
    pub fn on_search(&mut self, city: &str) -> bool {
        self.city = city.to_string();
        self.dispatch("search")
    }

    /// Track the city field as it is edited; refreshes query whatever it holds.
    pub fn set_city(&mut self, city: &str) {
        self.city.clear();
        self.city.push_str(city);
    }

    /// Re-query whatever the city field currently holds.
    pub fn on_refresh(&mut self) -> bool {
        self.dispatch("refresh")
    }

    /// Apply a finished fetch. Returns `false` when it was superseded and dropped.
    pub fn on_query_complete(&mut self, completion: Completion) -> bool {
        let Completion { seq, result } = completion;

        if !self.state.finish(seq) {
            debug!(
                seq,
                latest = self.last_seq,
                "dropping stale forecast completion"
            );
            return false;
        }
        self.busy.hide();

        match result {
            Ok(forecast) => {
                info!(
                    seq,
                    location = %forecast.location_name,
                    days = forecast.days.len(),
                    "showing forecast"
                );
                self.view = View {
                    summary: format_forecast(&forecast),
                    error: None,
                    series: Some(SeriesBundle::extract(&forecast)),
                };
            }
            Err(kind) => {
                info!(seq, kind = kind.as_str(), "showing fetch error");
                self.view = View {
                    summary: String::new(),
                    error: Some(kind.user_message()),
                    series: None,
                };
            }
        }
        true
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::Refresh => {
                debug!("scheduled refresh");
                self.on_refresh();
            }
            Event::Blink => self.busy.tick(&self.state),
            Event::Completed(completion) => {
                self.on_query_complete(completion);
            }
        }
    }

    fn dispatch(&mut self, trigger: &'static str) -> bool {
        let query = match ForecastQuery::new(&self.city) {
            Ok(query) => query,
            Err(kind) => {
                self.show_validation_error(kind);
                return false;
            }
        };

        self.view.summary.clear();
        self.view.error = None;

        self.last_seq += 1;
        let seq = self.last_seq;
        self.state.begin(seq);
        self.busy.show();

        info!(seq, trigger, city = %query, "fetching forecast");

        let provider = Arc::clone(&self.provider);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = provider.fetch(&query).await;
            if events.send(Event::Completed(Completion { seq, result })).is_err() {
                warn!(seq, "forecast completed after the window closed");
            }
        });

        true
    }

    fn show_validation_error(&mut self, kind: ErrorKind) {
        // An outstanding request still completes normally.
        self.view.error = Some(kind.user_message());
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn state(&self) -> FetchState {
        self.state
    }

    pub fn is_busy_visible(&self) -> bool {
        self.busy.is_visible()
    }
}
