//! UI Rendering Logic
//!
//! Coordinates rendering of the account screen and the popup overlay.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;
use crate::tui::screens::accounts::render_accounts;
use crate::Error;

const MIN_WIDTH: u16 = 80;
const MIN_HEIGHT: u16 = 24;

/// Main UI rendering function
pub fn render_ui(frame: &mut Frame, app: &App) -> Result<(), Error> {
    let size = frame.area();

    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        render_size_warning(frame, size);
        return Ok(());
    }

    render_accounts(frame, app);

    // Modal overlay on top of the screen
    if app.state.popup.is_visible() {
        app.state.popup.render(frame, size);
    }

    Ok(())
}

fn render_size_warning(frame: &mut Frame, size: Rect) {
    frame.render_widget(Clear, size);
    frame.render_widget(
        Paragraph::new(format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}",
            size.width, size.height, MIN_WIDTH, MIN_HEIGHT
        ))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Resize")),
        size,
    );
}
