//! Refresh timers and the fetch state machine.
//!
//! Two interval tasks feed the controller's queue: one asks for a refresh of the
//! current city, the other drives the busy indicator. Neither touches displayed
//! state directly; the UI loop applies every event in arrival order.

use std::time::Duration;

use tokio::{
    sync::mpsc::UnboundedSender,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::debug;

use crate::controller::Event;

/// `Idle → Fetching → Idle`, keyed by the request sequence number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchState {
    #[default]
    Idle,
    Fetching { seq: u64 },
}

impl FetchState {
    /// A newer request supersedes any outstanding one.
    pub fn begin(&mut self, seq: u64) {
        *self = FetchState::Fetching { seq };
    }

    /// Returns `true` when `seq` is the outstanding request and the state went back to `Idle`.
    pub fn finish(&mut self, seq: u64) -> bool {
        match *self {
            FetchState::Fetching { seq: current } if current == seq => {
                *self = FetchState::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self, FetchState::Fetching { .. })
    }
}

/// Blinking "Loading..." marker.
///
/// Only blinks while a fetch is outstanding and is hidden as soon as the state is `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusyIndicator {
    visible: bool,
}

impl BusyIndicator {
    pub const LABEL: &'static str = "Loading...";

    /// Show immediately when a fetch starts, without waiting for the next blink.
    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn tick(&mut self, state: &FetchState) {
        self.visible = state.is_fetching() && !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Owns the auto-refresh and blink timers. Dropping it stops both.
#[derive(Debug)]
pub struct RefreshScheduler {
    tasks: Vec<JoinHandle<()>>,
}

impl RefreshScheduler {
    /// Start both timers. The first refresh fires one full `refresh_every` after start.
    pub fn spawn(
        refresh_every: Duration,
        blink_every: Duration,
        events: UnboundedSender<Event>,
    ) -> Self {
        let tasks = vec![
            spawn_ticker(refresh_every, events.clone(), || Event::Refresh),
            spawn_ticker(blink_every, events, || Event::Blink),
        ];

        Self { tasks }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

fn spawn_ticker(
    every: Duration,
    events: UnboundedSender<Event>,
    make: fn() -> Event,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if events.send(make()).is_err() {
                debug!("event queue closed, stopping timer");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn only_latest_request_returns_to_idle() {
        let mut state = FetchState::default();
        state.begin(1);
        state.begin(2);

        assert!(!state.finish(1));
        assert_eq!(state, FetchState::Fetching { seq: 2 });
        assert!(state.finish(2));
        assert_eq!(state, FetchState::Idle);
        assert!(!state.finish(2));
    }

    #[test]
    fn indicator_blinks_only_while_fetching() {
        let mut busy = BusyIndicator::default();
        let mut state = FetchState::Idle;

        busy.tick(&state);
        assert!(!busy.is_visible());
        busy.tick(&state);
        assert!(!busy.is_visible());

        state.begin(7);
        busy.tick(&state);
        assert!(busy.is_visible());
        busy.tick(&state);
        assert!(!busy.is_visible());
        busy.tick(&state);
        assert!(busy.is_visible());

        state.finish(7);
        busy.tick(&state);
        assert!(!busy.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn timers_fire_on_their_own_periods() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _scheduler = RefreshScheduler::spawn(
            Duration::from_secs(1800),
            Duration::from_millis(500),
            tx,
        );

        // Nothing before the first blink period.
        time::sleep(Duration::from_millis(499)).await;
        assert!(rx.try_recv().is_err());

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(rx.recv().await, Some(Event::Blink));

        time::sleep(Duration::from_secs(1800)).await;
        let mut refreshes = 0;
        while let Ok(ev) = rx.try_recv() {
            if ev == Event::Refresh {
                refreshes += 1;
            }
        }
        assert_eq!(refreshes, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_scheduler_stops_timers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let every = Duration::from_secs(10);
        let scheduler = RefreshScheduler::spawn(every, every, tx);
        drop(scheduler);

        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(rx.recv().await, None);
    }
}
