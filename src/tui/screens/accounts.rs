//! Account management screen
//!
//! The single screen of the application: a header with the endpoint in use,
//! the account table, and the status bar.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::App;
use crate::tui::components::status_bar::render_status_bar;
use crate::tui::components::tables::render_account_table;

/// Render the account management screen
pub fn render_accounts(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Table
            Constraint::Length(4), // Status bar + key help
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_account_table(frame, &app.state, chunks[1]);
    render_status_bar(frame, &app.state, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(50)])
        .split(area);

    frame.render_widget(
        Paragraph::new("Account Management")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL)),
        header_chunks[0],
    );

    frame.render_widget(
        Paragraph::new(app.endpoint())
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title("Endpoint")),
        header_chunks[1],
    );
}
