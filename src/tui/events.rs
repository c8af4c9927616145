//! Event Handling System
//!
//! This module manages keyboard events for the TUI application and carries
//! the completion events that background network tasks send back into the
//! main loop.

use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::account::Account;

/// Application events that can be handled
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Quit the application
    Quit,
    /// Move focus to the next field
    Tab,
    /// Move focus to the previous field (Shift+Tab)
    BackTab,
    /// Enter/confirm action
    Enter,
    /// Escape/cancel action
    Escape,
    /// Arrow key navigation
    Up,
    Down,
    Left,
    Right,
    /// Character input
    Char(char),
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Home key
    Home,
    /// End key
    End,
    /// Refresh/reload action (F5)
    Refresh,

    // === Network completion events ===
    /// Account list fetch finished; replaces local state wholesale
    AccountsLoaded(Vec<Account>),
    /// Create request finished
    AccountAdded { success: bool },
    /// Update request finished for the given account id
    AccountSaved { id: String, success: bool },
    /// Delete request finished for the given account id
    AccountDeleted { id: String, success: bool },
}

impl Event {
    /// Whether this event is a network completion rather than user input
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Event::AccountsLoaded(_)
                | Event::AccountAdded { .. }
                | Event::AccountSaved { .. }
                | Event::AccountDeleted { .. }
        )
    }
}

/// Event handler for processing terminal events
pub struct EventHandler {
    /// Receiver for events
    receiver: mpsc::UnboundedReceiver<Event>,
    /// Sender for events (cloned into background tasks)
    sender: mpsc::UnboundedSender<Event>,
    /// Handle for the background terminal event processing task
    _terminal_task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        // Spawn a task to handle terminal events
        let event_sender = sender.clone();
        let terminal_task = tokio::spawn(async move {
            loop {
                // Poll for events with a timeout to avoid blocking
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    if let Ok(terminal_event) = event::read() {
                        if let Some(app_event) = Self::convert_terminal_event(terminal_event) {
                            if event_sender.send(app_event).is_err() {
                                break; // Channel closed, exit the loop
                            }
                        }
                    }
                }

                // Small delay to prevent high CPU usage
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        });

        Self {
            receiver,
            sender,
            _terminal_task: terminal_task,
        }
    }

    /// Get the next event
    pub async fn next(&mut self) -> Result<Event, Box<dyn std::error::Error + Send + Sync>> {
        self.receiver
            .recv()
            .await
            .ok_or_else(|| "Event channel closed".into())
    }

    /// Clone the sender so background tasks can post completion events
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.sender.clone()
    }

    /// Convert a terminal event to an application event
    fn convert_terminal_event(terminal_event: event::Event) -> Option<Event> {
        match terminal_event {
            event::Event::Key(key_event) => Self::convert_key_event(key_event),
            _ => None,
        }
    }

    /// Convert a key event to an application event
    pub fn convert_key_event(key_event: KeyEvent) -> Option<Event> {
        match key_event {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Some(Event::Quit),

            // Tab navigation
            KeyEvent {
                code: KeyCode::Tab,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Tab),

            KeyEvent {
                code: KeyCode::BackTab,
                modifiers: KeyModifiers::SHIFT,
                ..
            } => Some(Event::BackTab),

            // Action keys
            KeyEvent {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Enter),

            KeyEvent {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Escape),

            // Arrow keys
            KeyEvent {
                code: KeyCode::Up,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Up),

            KeyEvent {
                code: KeyCode::Down,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Down),

            KeyEvent {
                code: KeyCode::Left,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Left),

            KeyEvent {
                code: KeyCode::Right,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Right),

            // Editing keys
            KeyEvent {
                code: KeyCode::Backspace,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Backspace),

            KeyEvent {
                code: KeyCode::Delete,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Delete),

            KeyEvent {
                code: KeyCode::Home,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Home),

            KeyEvent {
                code: KeyCode::End,
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::End),

            // F5 refreshes; other function keys have no binding
            KeyEvent {
                code: KeyCode::F(5),
                modifiers: KeyModifiers::NONE,
                ..
            } => Some(Event::Refresh),

            // Character input (plain and shifted)
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE,
                ..
            }
            | KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::SHIFT,
                ..
            } => Some(Event::Char(c)),

            // Ignore other key combinations
            _ => None,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
