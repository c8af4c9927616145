//! Add Account Popup
//!
//! Modal form for creating a new account. The popup owns the draft (one
//! text input per field), runs the validators in the fixed submission order
//! on save, and stays open with the offending field highlighted until every
//! check passes. Backend failures never set a field error; the popup simply
//! stays open with the draft intact.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::account::AccountDraft;
use crate::tui::components::forms::TextInput;
use crate::tui::events::Event;
use crate::validator::{self, Field};

const FIELD_COUNT: usize = 6;

/// Modal form collecting the fields of a new account
#[derive(Debug, Clone)]
pub struct AddAccountPopup {
    visible: bool,
    firstname: TextInput,
    lastname: TextInput,
    email: TextInput,
    password: TextInput,
    confirm_password: TextInput,
    mobileno: TextInput,
    /// Index of the focused field, in render order
    focus: usize,
}

impl AddAccountPopup {
    pub fn new() -> Self {
        let mut popup = Self {
            visible: false,
            firstname: TextInput::new("First Name")
                .required()
                .with_placeholder("First Name"),
            lastname: TextInput::new("Last Name").with_placeholder("Last Name"),
            email: TextInput::new("Email").required().with_placeholder("Email"),
            password: TextInput::new("Password").required().masked(),
            confirm_password: TextInput::new("Confirm Password").required().masked(),
            mobileno: TextInput::new("Mobile No")
                .required()
                .with_placeholder("10 digits"),
            focus: 0,
        };
        popup.apply_focus();
        popup
    }

    /// Whether the popup is currently shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the popup. The draft from a previous, unsubmitted attempt is
    /// kept, matching the cancel behavior of the form.
    pub fn open(&mut self) {
        self.visible = true;
        self.focus = 0;
        self.apply_focus();
    }

    /// Hide the popup without touching the draft
    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Hide the popup and clear the draft (after a successful submit)
    pub fn close_and_clear(&mut self) {
        self.visible = false;
        self.reset();
    }

    /// Clear every field and error
    pub fn reset(&mut self) {
        for input in self.inputs_mut() {
            input.clear();
        }
        self.focus = 0;
        self.apply_focus();
    }

    /// Build a draft from the current field values
    pub fn draft(&self) -> AccountDraft {
        AccountDraft {
            firstname: self.firstname.value().to_string(),
            lastname: self.lastname.value().to_string(),
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
            confirm_password: self.confirm_password.value().to_string(),
            mobileno: self.mobileno.value().to_string(),
        }
    }

    /// Run the validators over the current draft. On pass, returns the draft
    /// ready for submission; on failure, surfaces the error on the offending
    /// field and returns None, leaving the popup open.
    pub fn validate(&mut self) -> Option<AccountDraft> {
        for input in self.inputs_mut() {
            input.set_error(None);
        }

        let draft = self.draft();
        match validator::validate_draft(&draft) {
            Ok(()) => Some(draft),
            Err(err) => {
                let message = err.message.clone();
                self.input_for(err.field).set_error(Some(message));
                self.focus = Self::focus_index(err.field);
                self.apply_focus();
                None
            }
        }
    }

    /// First validation error currently displayed, if any
    pub fn current_error(&self) -> Option<&str> {
        self.inputs().into_iter().find_map(|input| input.error())
    }

    /// Move focus to the next field
    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FIELD_COUNT;
        self.apply_focus();
    }

    /// Move focus to the previous field
    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + FIELD_COUNT - 1) % FIELD_COUNT;
        self.apply_focus();
    }

    /// Feed an input event to the focused field. Returns whether it was
    /// consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Tab | Event::Down => {
                self.focus_next();
                true
            }
            Event::BackTab | Event::Up => {
                self.focus_prev();
                true
            }
            other => {
                let focus = self.focus;
                self.input_at(focus).handle_event(other)
            }
        }
    }

    fn inputs(&self) -> [&TextInput; FIELD_COUNT] {
        [
            &self.firstname,
            &self.lastname,
            &self.email,
            &self.password,
            &self.confirm_password,
            &self.mobileno,
        ]
    }

    fn inputs_mut(&mut self) -> [&mut TextInput; FIELD_COUNT] {
        [
            &mut self.firstname,
            &mut self.lastname,
            &mut self.email,
            &mut self.password,
            &mut self.confirm_password,
            &mut self.mobileno,
        ]
    }

    fn input_at(&mut self, index: usize) -> &mut TextInput {
        match index {
            0 => &mut self.firstname,
            1 => &mut self.lastname,
            2 => &mut self.email,
            3 => &mut self.password,
            4 => &mut self.confirm_password,
            _ => &mut self.mobileno,
        }
    }

    fn input_for(&mut self, field: Field) -> &mut TextInput {
        match field {
            Field::Firstname => &mut self.firstname,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
            Field::Mobile => &mut self.mobileno,
        }
    }

    fn focus_index(field: Field) -> usize {
        match field {
            Field::Firstname => 0,
            Field::Email => 2,
            Field::Password => 3,
            Field::ConfirmPassword => 4,
            Field::Mobile => 5,
        }
    }

    fn apply_focus(&mut self) {
        let focus = self.focus;
        for (i, input) in self.inputs_mut().into_iter().enumerate() {
            input.set_focused(i == focus);
        }
    }

    /// Render the popup as a centered overlay
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let popup_area = centered_rect(50, 90, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title("Add Account");
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // First Name
                Constraint::Length(3), // Last Name
                Constraint::Length(3), // Email
                Constraint::Length(3), // Password
                Constraint::Length(3), // Confirm Password
                Constraint::Length(3), // Mobile No
                Constraint::Length(1), // Error line
                Constraint::Length(1), // Key help
            ])
            .split(inner);

        for (i, input) in self.inputs().into_iter().enumerate() {
            input.render_compact(frame, chunks[i]);
        }

        if let Some(error) = self.current_error() {
            frame.render_widget(
                Paragraph::new(error)
                    .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                chunks[6],
            );
        }

        frame.render_widget(
            Paragraph::new("Enter: Save | Esc: Cancel | Tab: Next field")
                .style(Style::default().fg(Color::Gray)),
            chunks[7],
        );
    }
}

impl Default for AddAccountPopup {
    fn default() -> Self {
        Self::new()
    }
}

/// Centered sub-rectangle, sized as percentages of the containing area
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(popup: &mut AddAccountPopup, text: &str) {
        for c in text.chars() {
            popup.handle_event(&Event::Char(c));
        }
    }

    fn fill_valid(popup: &mut AddAccountPopup) {
        popup.reset();
        type_into(popup, "Ada"); // firstname
        popup.focus_next();
        type_into(popup, "Lovelace"); // lastname
        popup.focus_next();
        type_into(popup, "ada@example.com"); // email
        popup.focus_next();
        type_into(popup, "Ab1!23456"); // password
        popup.focus_next();
        type_into(popup, "Ab1!23456"); // confirm
        popup.focus_next();
        type_into(popup, "1234567890"); // mobile
    }

    #[test]
    fn test_validate_passes_with_valid_draft() {
        let mut popup = AddAccountPopup::new();
        popup.open();
        fill_valid(&mut popup);

        let draft = popup.validate().expect("draft should validate");
        assert_eq!(draft.firstname, "Ada");
        assert_eq!(draft.email, "ada@example.com");
        assert!(popup.current_error().is_none());
    }

    #[test]
    fn test_empty_firstname_blocks_submission() {
        let mut popup = AddAccountPopup::new();
        popup.open();
        fill_valid(&mut popup);

        // Wipe the firstname
        let mut fresh = AddAccountPopup::new();
        fresh.open();
        fresh.lastname = popup.lastname.clone();
        fresh.email = popup.email.clone();
        fresh.password = popup.password.clone();
        fresh.confirm_password = popup.confirm_password.clone();
        fresh.mobileno = popup.mobileno.clone();

        assert!(fresh.validate().is_none());
        assert_eq!(fresh.current_error(), Some("firstname is mandatory"));
        assert!(fresh.is_visible());
    }

    #[test]
    fn test_validation_stops_at_first_failing_field() {
        let mut popup = AddAccountPopup::new();
        popup.open();
        fill_valid(&mut popup);

        // Break both the email and the mobile number; email is reported
        popup.email = TextInput::new("Email").required().with_value("ada@x.org");
        popup.mobileno = TextInput::new("Mobile No").required().with_value("123");

        assert!(popup.validate().is_none());
        assert_eq!(
            popup.email.error(),
            Some("Email must end with .com or .in")
        );
        assert!(popup.mobileno.error().is_none());
    }

    #[test]
    fn test_close_keeps_draft_and_clear_resets_it() {
        let mut popup = AddAccountPopup::new();
        popup.open();
        fill_valid(&mut popup);

        popup.close();
        assert!(!popup.is_visible());
        assert_eq!(popup.draft().firstname, "Ada");

        popup.open();
        popup.close_and_clear();
        assert_eq!(popup.draft(), AccountDraft::default());
    }

    #[test]
    fn test_focus_cycles_through_all_fields() {
        let mut popup = AddAccountPopup::new();
        popup.open();
        for _ in 0..FIELD_COUNT {
            popup.focus_next();
        }
        assert!(popup.firstname.is_focused());

        popup.focus_prev();
        assert!(popup.mobileno.is_focused());
    }
}
