// TUI event loop and terminal management
use crate::{App, AppAction};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use stargaze_core::SearchEvent;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

/// How long to wait for a key before checking on background tasks
const TICK: Duration = Duration::from_millis(50);

/// Take over the terminal until the user quits
///
/// Must run inside a multi-threaded tokio runtime: key polling blocks this
/// thread briefly while debounce timers and fetches run on the others.
pub async fn run_tui(mut app: App, mut events: UnboundedReceiver<SearchEvent>) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &mut events);

    // Restore terminal even if the loop bailed out
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("TUI closed");
    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut UnboundedReceiver<SearchEvent>,
) -> anyhow::Result<()> {
    loop {
        // Drain whatever the timers and fetches produced since the last frame
        while let Ok(event) = events.try_recv() {
            app.handle_search_event(event);
        }

        terminal.draw(|f| crate::ui::render(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(AppAction::OpenUrl(url)) = app.handle_key(key) {
                        if let Err(e) = open::that(&url) {
                            warn!("Failed to open browser for {}: {}", url, e);
                        }
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
