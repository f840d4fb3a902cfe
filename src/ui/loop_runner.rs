//! Main event loop for the TUI.
//!
//! Multiplexes terminal input, background load completions, and a periodic
//! tick. Every event that can change the visibility signal or the loading
//! flags re-attempts the guarded load transition, so the feed keeps filling
//! while the cursor stays near the end of the list.

use crate::app::{App, AppEvent};
use crate::feed::LoadError;
use anyhow::Result;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::events::handle_app_event;
use super::input::handle_input;
use super::render::{render, SPINNER_FRAMES};

/// Result of handling a key press event.
pub enum Action {
    /// Continue the event loop and process more events.
    Continue,
    /// Exit the application and restore the terminal.
    Quit,
}

/// Runs the TUI application event loop.
///
/// Uses `tokio::select!` to multiplex three event sources:
/// - **Terminal input**: Key presses from crossterm's async event stream
/// - **Background loads**: Page load completions via the `AppEvent` channel
/// - **Periodic tick**: 250ms timer for the spinner and status expiry
///
/// # Panic Safety
///
/// Installs a panic hook that restores terminal state before unwinding,
/// ensuring the terminal is not left in raw mode on panic.
pub async fn run(
    app: &mut App,
    event_tx: mpsc::Sender<AppEvent>,
    mut event_rx: mpsc::Receiver<AppEvent>,
) -> Result<()> {
    // Install panic hook BEFORE setting up terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut event_stream = crossterm::event::EventStream::new();

    let mut tick_interval = tokio::time::interval(Duration::from_millis(250));

    // Signal handlers for graceful shutdown (Unix only)
    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    // The initial page is already loaded, but a small page size can leave
    // the cursor near the end from the start — chain-load immediately.
    maybe_spawn_load(app, &event_tx);

    loop {
        // Only render when state has changed
        if app.needs_redraw {
            terminal.draw(|f| render(f, app))?;
            app.needs_redraw = false;
        }

        if app.clear_expired_status() {
            app.needs_redraw = true;
        }

        // Drain pending load completions before waiting for more input so a
        // finished page appears promptly even during rapid key presses.
        while let Ok(event) = event_rx.try_recv() {
            app.needs_redraw = true;
            handle_app_event(app, event);
            maybe_spawn_load(app, &event_tx);
        }

        // Platform-specific signal futures
        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let sigint_fut = sigint.recv();
        #[cfg(not(unix))]
        let sigint_fut = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;  // Process in order listed for predictable behavior

            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            _ = sigint_fut => {
                tracing::info!("Received SIGINT, shutting down gracefully");
                break;
            }

            // Terminal input events
            maybe_event = event_stream.next() => {
                if let Some(Ok(Event::Key(key))) = maybe_event {
                    app.needs_redraw = true;
                    match handle_input(app, key.code, key.modifiers) {
                        Action::Quit => break,
                        Action::Continue => {}
                    }
                    // Cursor or filter may have moved near the end
                    maybe_spawn_load(app, &event_tx);
                }
            }

            // Background load events (blocking recv for when queue was empty)
            Some(event) = event_rx.recv() => {
                app.needs_redraw = true;
                handle_app_event(app, event);
                maybe_spawn_load(app, &event_tx);
            }

            // Periodic tick for spinner animation
            _ = tick_interval.tick() => {
                handle_tick(app);
            }
        }
    }

    restore_terminal(terminal)?;
    Ok(())
}

/// Advance the loading spinner while a load is in flight.
fn handle_tick(app: &mut App) {
    if app.controller.is_loading() {
        app.spinner_frame = (app.spinner_frame + 1) % SPINNER_FRAMES;
        app.needs_redraw = true;
    }
}

/// Attempt the guarded load transition and spawn the delayed load task.
///
/// Does nothing unless the cursor is near the end of the visible list AND
/// the controller hands out a ticket (no load in flight, feed not
/// exhausted). The spawned task models the network round trip: it sleeps
/// the configured latency, then reports back over the event channel tagged
/// with the session generation.
fn maybe_spawn_load(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if !app.near_end() {
        return;
    }
    let Some(ticket) = app.controller.request_load() else {
        return;
    };

    app.load_attempts += 1;
    let generation = app.load_generation;
    let fail = app
        .fail_every
        .is_some_and(|n| n > 0 && app.load_attempts % n == 0);
    let delay = app.load_delay;
    let tx = event_tx.clone();

    tracing::debug!(
        page = ticket.page(),
        generation,
        delay_ms = delay.as_millis() as u64,
        fail,
        "Spawning page load"
    );
    app.needs_redraw = true;

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let event = if fail {
            AppEvent::LoadFailed {
                generation,
                error: LoadError::Failed("injected network failure".to_string()),
            }
        } else {
            AppEvent::LoadReady { generation, ticket }
        };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to deliver load result (receiver dropped)");
        }
    });
}

/// Set up the terminal for TUI rendering.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state.
fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
