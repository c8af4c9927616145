//! Account table rendering
//!
//! Draws the account list with masked passwords and, for the row being
//! edited, the draft values from the row editor. Pure rendering; all state
//! lives in the app module.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use crate::account::Account;
use crate::tui::app::AppState;

const MASKED_PASSWORD: &str = "********";

/// Render the account table
pub fn render_account_table(frame: &mut Frame, state: &AppState, area: Rect) {
    if state.accounts.is_empty() {
        let empty_msg = Paragraph::new("No accounts\nPress 'a' to add one, 'r' to refresh")
            .style(Style::default().fg(Color::Gray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue))
                    .title("Accounts"),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(empty_msg, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("ID").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("First Name").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Last Name").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Email").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Password").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Mobile No").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .style(Style::default().bg(Color::DarkGray));

    let rows: Vec<Row> = state
        .accounts
        .iter()
        .map(|account| account_row(state, account))
        .collect();

    let title = if state.editor.is_some() {
        "Accounts (editing - Tab: field, Enter: save, Esc: cancel)"
    } else {
        "Accounts"
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Percentage(16),
            Constraint::Percentage(16),
            Constraint::Percentage(28),
            Constraint::Percentage(16),
            Constraint::Percentage(14),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(title),
    )
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn account_row<'a>(state: &'a AppState, account: &'a Account) -> Row<'a> {
    if let Some(editor) = state.editor.as_ref().filter(|e| e.id == account.id) {
        // Draft values, focused column highlighted
        let editing = Style::default().fg(Color::Yellow);
        let focused = Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        let style_for = |i: usize| if editor.focus == i { focused } else { editing };

        let password_cell = if state.is_password_revealed(&account.id) {
            editor.password.value().to_string()
        } else {
            MASKED_PASSWORD.to_string()
        };

        return Row::new(vec![
            Cell::from(account.id.as_str()),
            Cell::from(editor.firstname.value().to_string()).style(style_for(0)),
            Cell::from(editor.lastname.value().to_string()).style(style_for(1)),
            Cell::from(editor.email.value().to_string()).style(style_for(2)),
            Cell::from(password_cell).style(style_for(3)),
            Cell::from(editor.mobileno.value().to_string()).style(style_for(4)),
        ]);
    }

    let password_cell = if state.is_password_revealed(&account.id) {
        account.password.as_str()
    } else {
        MASKED_PASSWORD
    };

    Row::new(vec![
        Cell::from(account.id.as_str()),
        Cell::from(account.firstname.as_str()),
        Cell::from(account.lastname.as_str()),
        Cell::from(account.email.as_str()),
        Cell::from(password_cell),
        Cell::from(account.mobileno.as_str()),
    ])
}
