//! Terminal User Interface
//!
//! Terminal lifecycle management and the main application loop for the
//! account admin console.

pub mod app;
pub mod components;
pub mod events;
pub mod screens;
pub mod ui;

pub use app::{App, AppState};
pub use events::{Event, EventHandler};
pub use ui::render_ui;

use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::client::AccountClient;
use crate::error::Error;

pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Global flag to track if terminal cleanup is needed
static TERMINAL_NEEDS_CLEANUP: AtomicBool = AtomicBool::new(false);

/// Initialize the terminal for TUI mode
///
/// Sets up the terminal with alternate screen and raw mode, and tracks that
/// cleanup will be needed.
pub fn init_terminal() -> Result<TuiTerminal, Error> {
    enable_raw_mode().map_err(Error::Io)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(Error::Io)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(Error::Io)?;

    terminal.hide_cursor().map_err(Error::Io)?;
    TERMINAL_NEEDS_CLEANUP.store(true, Ordering::SeqCst);

    Ok(terminal)
}

/// Restore the terminal to normal mode. Safe to call multiple times.
pub fn restore_terminal(terminal: &mut TuiTerminal) -> Result<(), Error> {
    if TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst) {
        disable_raw_mode().map_err(Error::Io)?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(Error::Io)?;
        terminal.show_cursor().map_err(Error::Io)?;
        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
    }
    Ok(())
}

/// Emergency terminal cleanup for panic situations. Ignores errors so the
/// terminal is restored even mid-panic.
fn emergency_terminal_cleanup() {
    if TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = execute!(io::stdout(), cursor::Show);
        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
    }
}

/// Install a panic handler that restores terminal state before displaying
/// panic information
pub fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        emergency_terminal_cleanup();
        original_hook(panic_info);
    }));
}

/// Main TUI application entry point
///
/// Handles terminal initialization and cleanup, the panic handler, the main
/// application loop, and graceful shutdown.
pub async fn run_tui(client: AccountClient) -> Result<(), Error> {
    setup_panic_handler();

    let mut terminal = init_terminal().map_err(|e| {
        emergency_terminal_cleanup();
        e
    })?;

    let mut event_handler = EventHandler::new();
    let mut app = App::new(client, event_handler.sender());

    app.set_status("Press 'a' to add an account, 'q' to quit".to_string());
    // Initial load
    app.refresh_accounts();

    let app_result = run_app_loop(&mut terminal, &mut app, &mut event_handler).await;

    // Always attempt to restore the terminal, even on error
    if let Err(restore_error) = restore_terminal(&mut terminal) {
        if app_result.is_ok() {
            return Err(restore_error);
        }
        eprintln!("Warning: Failed to restore terminal: {}", restore_error);
    }

    app_result
}

/// Internal application loop, separated from run_tui for cleanup handling
async fn run_app_loop(
    terminal: &mut TuiTerminal,
    app: &mut App,
    event_handler: &mut EventHandler,
) -> Result<(), Error> {
    loop {
        terminal
            .draw(|frame| {
                if let Err(e) = render_ui(frame, app) {
                    app.set_status(format!("Render error: {}", e));
                }
            })
            .map_err(Error::Io)?;

        // Handle events with a timeout so the UI refreshes while network
        // completions are pending
        match tokio::time::timeout(std::time::Duration::from_millis(100), event_handler.next())
            .await
        {
            Ok(Ok(event)) => match app.handle_event(event).await {
                Ok(should_quit) => {
                    if should_quit {
                        break;
                    }
                }
                Err(e) => {
                    app.set_status(format!("Event handling error: {}", e));
                }
            },
            Ok(Err(e)) => {
                app.set_status(format!("Event error: {}", e));
            }
            Err(_) => {
                // Timeout, continue the loop for periodic redraws
            }
        }

        if app.state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Verify the terminal supports the TUI before initializing it
pub fn check_terminal_support() -> Result<(), Error> {
    let (width, height) = crossterm::terminal::size().map_err(Error::Io)?;

    if width < 80 || height < 24 {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("Terminal too small: {}x{} (minimum: 80x24)", width, height),
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_needs_cleanup_flag() {
        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
        assert!(!TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst));

        TERMINAL_NEEDS_CLEANUP.store(true, Ordering::SeqCst);
        assert!(TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst));

        TERMINAL_NEEDS_CLEANUP.store(false, Ordering::SeqCst);
    }

    #[test]
    fn test_emergency_cleanup_resets_flag() {
        TERMINAL_NEEDS_CLEANUP.store(true, Ordering::SeqCst);
        emergency_terminal_cleanup();
        assert!(!TERMINAL_NEEDS_CLEANUP.load(Ordering::SeqCst));
    }
}
