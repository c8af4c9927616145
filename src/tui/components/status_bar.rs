//! Status bar
//!
//! Bottom strip showing the loading indicator, the latest status message,
//! and the key bindings for the current mode.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::{AppState, LoadingState};

/// Render the status bar: message line plus key help
pub fn render_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let (message, color) = match &state.loading_state {
        LoadingState::Loading(msg) => (msg.clone(), Color::Yellow),
        LoadingState::Error(msg) => (msg.clone(), Color::Red),
        LoadingState::Success(msg) => match &state.status_message {
            Some(status) => (format!("{} ({})", status, msg), Color::Green),
            None => (msg.clone(), Color::Green),
        },
        LoadingState::Idle => (
            state.status_message.clone().unwrap_or_default(),
            Color::White,
        ),
    };

    frame.render_widget(
        Paragraph::new(message).style(Style::default().fg(color)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title("Status"),
        ),
        chunks[0],
    );

    let help = if state.popup.is_visible() || state.editor.is_some() {
        "Enter: Save | Esc: Cancel | Tab: Next field"
    } else {
        "↑/↓: Select | a: Add | e: Edit | d: Delete | p: Show password | r: Refresh | q: Quit"
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::Gray)),
        chunks[1],
    );
}
