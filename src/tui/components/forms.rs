//! Form Input Components
//!
//! Reusable single-line text inputs backed by tui-input, used by the add
//! popup and the inline row editor. Validation is form-level (the popup runs
//! the validators on submit); inputs only hold the error handed to them so
//! it renders next to the offending field.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::{Input, InputRequest};

use crate::tui::events::Event;

/// Text input component with a label, optional masking, and an error slot
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// The underlying tui-input state
    input: Input,
    /// Label for the input field
    label: String,
    /// Whether the input is focused
    focused: bool,
    /// Whether the value renders masked (passwords)
    masked: bool,
    /// Whether the field is marked required in the form
    required: bool,
    /// Placeholder text shown while empty and unfocused
    placeholder: String,
    /// Error message surfaced under the field
    error: Option<String>,
}

impl TextInput {
    /// Create a new text input with a label
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Mark the input as required (renders a `*` after the label)
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Render the value masked
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Set placeholder text
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the current value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.input = Input::default().with_value(value.into());
        self
    }

    /// Get the current value
    pub fn value(&self) -> &str {
        self.input.value()
    }

    /// Set focus state
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Check if this input is focused
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Set or clear the error shown under the field
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Get the current error, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clear value and error
    pub fn clear(&mut self) {
        self.input = Input::default();
        self.error = None;
    }

    /// Feed an application event into the input. Returns whether the event
    /// was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let request = match event {
            Event::Char(c) => Some(InputRequest::InsertChar(*c)),
            Event::Backspace => Some(InputRequest::DeletePrevChar),
            Event::Delete => Some(InputRequest::DeleteNextChar),
            Event::Left => Some(InputRequest::GoToPrevChar),
            Event::Right => Some(InputRequest::GoToNextChar),
            Event::Home => Some(InputRequest::GoToStart),
            Event::End => Some(InputRequest::GoToEnd),
            _ => None,
        };

        match request {
            Some(request) => {
                // Typing clears a stale error for this field
                if matches!(request, InputRequest::InsertChar(_)) {
                    self.error = None;
                }
                self.input.handle(request);
                true
            }
            None => false,
        }
    }

    /// Render as a 3-row box with the label as the block title. Errors show
    /// as a red border; the surrounding form renders the message itself.
    pub fn render_compact(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.error.is_some() {
            Style::default().fg(Color::Red)
        } else if self.focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Blue)
        };

        let title = if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        };

        let display_value = if self.masked {
            "*".repeat(self.input.value().chars().count())
        } else if self.input.value().is_empty() && !self.focused {
            self.placeholder.clone()
        } else {
            self.input.value().to_string()
        };

        let text_style = if self.input.value().is_empty() && !self.focused {
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC)
        } else {
            Style::default().fg(Color::White)
        };

        frame.render_widget(
            Paragraph::new(display_value)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border_style)
                        .title(title),
                )
                .style(text_style),
            area,
        );

        if self.focused {
            let cursor_x = area.x + self.input.visual_cursor() as u16 + 1;
            let cursor_y = area.y + 1;
            frame.set_cursor_position((cursor_x, cursor_y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::new("First Name").required();
        assert!(input.handle_event(&Event::Char('A')));
        assert!(input.handle_event(&Event::Char('d')));
        assert!(input.handle_event(&Event::Char('a')));
        assert_eq!(input.value(), "Ada");

        assert!(input.handle_event(&Event::Backspace));
        assert_eq!(input.value(), "Ad");

        // Non-editing events are not consumed
        assert!(!input.handle_event(&Event::Enter));
        assert!(!input.handle_event(&Event::Tab));
    }

    #[test]
    fn test_typing_clears_error() {
        let mut input = TextInput::new("Email").required();
        input.set_error(Some("Email must contain \"@\"".to_string()));
        assert!(input.error().is_some());

        input.handle_event(&Event::Char('a'));
        assert!(input.error().is_none());
    }

    #[test]
    fn test_render_compact_masks_value() {
        use ratatui::{backend::TestBackend, Terminal};

        let input = TextInput::new("Password").masked().with_value("Secr3t!pw");
        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                input.render_compact(frame, area);
            })
            .unwrap();

        let rendered: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("*********"));
        assert!(!rendered.contains("Secr3t!pw"));
    }

    #[test]
    fn test_clear_resets_value_and_error() {
        let mut input = TextInput::new("Mobile").with_value("12345");
        input.set_error(Some("Mobile No must be 10 digits".to_string()));
        input.clear();
        assert_eq!(input.value(), "");
        assert!(input.error().is_none());
    }
}
