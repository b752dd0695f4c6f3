use std::{
    io::{self, Stdout},
    sync::Arc,
    time::Duration,
};

use anyhow::Result;
use chrono::Local;
use crossterm::{
    cursor,
    event::{self, Event as TermEvent},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;
use zenithsky_core::{Config, Event, ForecastProvider, PresentationController, RefreshScheduler};

use crate::{
    input::{self, Action},
    ui::{self, Screen},
};

const INPUT_POLL: Duration = Duration::from_millis(33);

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Open the window and run until the user quits.
pub async fn run(
    config: &Config,
    provider: Arc<dyn ForecastProvider>,
    initial_city: Option<String>,
) -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut controller = PresentationController::new(provider, tx.clone());
    let scheduler = RefreshScheduler::spawn(
        config.refresh_interval(),
        config.busy_blink_interval(),
        tx,
    );

    let mut input = String::new();
    if let Some(city) = initial_city {
        input = city;
        controller.on_search(&input);
    }

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut controller, rx, input);
    restore_terminal(&mut terminal)?;

    drop(scheduler);
    info!("window closed");
    result
}

fn event_loop(
    terminal: &mut Term,
    controller: &mut PresentationController,
    mut rx: UnboundedReceiver<Event>,
    mut input: String,
) -> Result<()> {
    let mut updated_at = None;

    loop {
        // Timer ticks and finished fetches are applied here and nowhere else.
        while let Ok(event) = rx.try_recv() {
            match event {
                Event::Completed(completion) => {
                    let succeeded = completion.result.is_ok();
                    if controller.on_query_complete(completion) && succeeded {
                        updated_at = Some(Local::now());
                    }
                }
                other => controller.handle(other),
            }
        }

        terminal.draw(|f| {
            ui::draw(
                f,
                &Screen {
                    input: &input,
                    view: controller.view(),
                    busy_visible: controller.is_busy_visible(),
                    updated_at,
                },
            )
        })?;

        if !event::poll(INPUT_POLL)? {
            continue;
        }
        let TermEvent::Key(key) = event::read()? else {
            continue;
        };

        match input::map_key(key) {
            Some(Action::Quit) => return Ok(()),
            Some(Action::Search) => {
                controller.on_search(&input);
            }
            Some(Action::Refresh) => {
                controller.on_refresh();
            }
            Some(action) => {
                if input::edit(&mut input, action) {
                    controller.set_city(&input);
                }
            }
            None => {}
        }
    }
}

fn setup_terminal() -> Result<Term> {
    terminal::enable_raw_mode()?;
    let mut out = io::stdout();
    execute!(out, EnterAlternateScreen, cursor::Hide)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(out))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    execute!(io::stdout(), cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    terminal.show_cursor()?;
    Ok(())
}
