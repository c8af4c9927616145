//! Application State Management
//!
//! This module owns the authoritative in-memory account list and every state
//! transition around it: fetch, row editing through a draft buffer, add via
//! the popup, delete, and password reveal. Rendering never mutates state;
//! network calls are spawned tasks whose completions come back as events.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::account::Account;
use crate::client::AccountClient;
use crate::error::Error;
use crate::tui::components::forms::TextInput;
use crate::tui::components::popup::AddAccountPopup;
use crate::tui::events::Event;

/// Loading indicator state shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingState {
    Idle,
    Loading(String),
    Success(String),
    Error(String),
}

/// Draft buffer for the row currently being edited, keyed by account id.
///
/// The buffer is a full copy of the row; the list is only touched when the
/// backend accepts the PUT. Cancel discards the buffer and leaves the list
/// as fetched.
#[derive(Debug, Clone)]
pub struct RowEditor {
    /// Stable id of the account being edited
    pub id: String,
    pub firstname: TextInput,
    pub lastname: TextInput,
    pub email: TextInput,
    pub password: TextInput,
    pub mobileno: TextInput,
    /// Focused field, in column order
    pub focus: usize,
}

const EDITOR_FIELDS: usize = 5;

impl RowEditor {
    /// Start editing the given account with a copy of its current values
    pub fn new(account: &Account) -> Self {
        let mut editor = Self {
            id: account.id.clone(),
            firstname: TextInput::new("First Name").with_value(account.firstname.clone()),
            lastname: TextInput::new("Last Name").with_value(account.lastname.clone()),
            email: TextInput::new("Email").with_value(account.email.clone()),
            password: TextInput::new("Password").with_value(account.password.clone()),
            mobileno: TextInput::new("Mobile No").with_value(account.mobileno.clone()),
            focus: 0,
        };
        editor.apply_focus();
        editor
    }

    /// Build the account this editor would save
    pub fn draft(&self) -> Account {
        Account {
            id: self.id.clone(),
            firstname: self.firstname.value().to_string(),
            lastname: self.lastname.value().to_string(),
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
            mobileno: self.mobileno.value().to_string(),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % EDITOR_FIELDS;
        self.apply_focus();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + EDITOR_FIELDS - 1) % EDITOR_FIELDS;
        self.apply_focus();
    }

    /// Feed an input event to the focused field
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Tab => {
                self.focus_next();
                true
            }
            Event::BackTab => {
                self.focus_prev();
                true
            }
            other => self.focused_input().handle_event(other),
        }
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            0 => &mut self.firstname,
            1 => &mut self.lastname,
            2 => &mut self.email,
            3 => &mut self.password,
            _ => &mut self.mobileno,
        }
    }

    fn apply_focus(&mut self) {
        let focus = self.focus;
        self.firstname.set_focused(focus == 0);
        self.lastname.set_focused(focus == 1);
        self.email.set_focused(focus == 2);
        self.password.set_focused(focus == 3);
        self.mobileno.set_focused(focus == 4);
    }
}

/// Global application state
pub struct AppState {
    /// Authoritative in-memory account list, replaced wholesale on fetch
    pub accounts: Vec<Account>,
    /// Table cursor
    pub selected: usize,
    /// Draft buffer for the row being edited, if any
    pub editor: Option<RowEditor>,
    /// Draft sent with an in-flight PUT, committed on success
    pub pending_save: Option<Account>,
    /// Account id whose password is revealed; at most one at a time
    pub revealed_password: Option<String>,
    /// Add-account modal
    pub popup: AddAccountPopup,
    /// Loading indicator for the status bar
    pub loading_state: LoadingState,
    /// Status message to display
    pub status_message: Option<String>,
    /// Whether the main loop should exit
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            selected: 0,
            editor: None,
            pending_save: None,
            revealed_password: None,
            popup: AddAccountPopup::new(),
            loading_state: LoadingState::Idle,
            status_message: None,
            should_quit: false,
        }
    }
}

impl AppState {
    /// Account under the table cursor
    pub fn selected_account(&self) -> Option<&Account> {
        self.accounts.get(self.selected)
    }

    /// Whether the given account's password is currently revealed
    pub fn is_password_revealed(&self, id: &str) -> bool {
        self.revealed_password.as_deref() == Some(id)
    }
}

/// Main application: state plus the client and the channel used to post
/// network completions back into the event loop
pub struct App {
    pub state: AppState,
    client: Arc<AccountClient>,
    io_tx: mpsc::UnboundedSender<Event>,
}

impl App {
    /// Create the application around a client and a completion-event sender
    pub fn new(client: AccountClient, io_tx: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            state: AppState::default(),
            client: Arc::new(client),
            io_tx,
        }
    }

    /// Endpoint URL the client talks to, for display
    pub fn endpoint(&self) -> String {
        self.client.config().account_url()
    }

    /// Set a status message
    pub fn set_status(&mut self, message: String) {
        self.state.status_message = Some(message);
    }

    /// Kick off a full list refresh; the result arrives as AccountsLoaded
    pub fn refresh_accounts(&mut self) {
        self.state.loading_state = LoadingState::Loading("Loading accounts...".to_string());
        let client = self.client.clone();
        let tx = self.io_tx.clone();
        tokio::spawn(async move {
            let accounts = client.fetch_accounts().await;
            let _ = tx.send(Event::AccountsLoaded(accounts));
        });
    }

    /// Handle an application event. Returns whether the app should quit.
    pub async fn handle_event(&mut self, event: Event) -> Result<bool, Error> {
        if event.is_completion() {
            self.handle_completion(event);
            return Ok(self.state.should_quit);
        }

        if let Event::Quit = event {
            self.state.should_quit = true;
            return Ok(true);
        }

        if self.state.popup.is_visible() {
            self.handle_popup_event(event);
        } else if self.state.editor.is_some() {
            self.handle_editor_event(event);
        } else {
            self.handle_table_event(event);
        }

        Ok(self.state.should_quit)
    }

    fn handle_popup_event(&mut self, event: Event) {
        match event {
            Event::Escape => {
                // Cancel hides the popup; the draft survives until a
                // successful submit clears it
                self.state.popup.close();
            }
            Event::Enter => self.submit_new_account(),
            other => {
                self.state.popup.handle_event(&other);
            }
        }
    }

    fn handle_editor_event(&mut self, event: Event) {
        match event {
            Event::Escape => self.cancel_edit(),
            Event::Enter => self.commit_edit(),
            other => {
                if let Some(editor) = self.state.editor.as_mut() {
                    editor.handle_event(&other);
                }
            }
        }
    }

    fn handle_table_event(&mut self, event: Event) {
        match event {
            Event::Char('q') => {
                self.state.should_quit = true;
            }
            Event::Up => {
                self.state.selected = self.state.selected.saturating_sub(1);
            }
            Event::Down => {
                if !self.state.accounts.is_empty() {
                    self.state.selected =
                        (self.state.selected + 1).min(self.state.accounts.len() - 1);
                }
            }
            Event::Char('a') => {
                self.state.popup.open();
            }
            Event::Char('e') => self.begin_edit(),
            Event::Char('d') => self.delete_selected(),
            Event::Char('p') => self.toggle_password_reveal(),
            Event::Char('r') | Event::Refresh => self.refresh_accounts(),
            _ => {}
        }
    }

    /// Start editing the selected row with a draft copy
    pub fn begin_edit(&mut self) {
        if let Some(account) = self.state.selected_account() {
            self.state.editor = Some(RowEditor::new(account));
        }
    }

    /// Discard the draft and leave edit mode; the list stays as fetched
    pub fn cancel_edit(&mut self) {
        self.state.editor = None;
        self.state.pending_save = None;
    }

    /// PUT the draft. The list is only updated when the backend confirms.
    pub fn commit_edit(&mut self) {
        let Some(editor) = self.state.editor.as_ref() else {
            return;
        };
        let draft = editor.draft();
        self.state.pending_save = Some(draft.clone());
        self.state.loading_state = LoadingState::Loading("Saving account...".to_string());

        let client = self.client.clone();
        let tx = self.io_tx.clone();
        tokio::spawn(async move {
            let success = client.update_account(&draft).await;
            let _ = tx.send(Event::AccountSaved {
                id: draft.id,
                success,
            });
        });
    }

    /// Validate the popup draft and POST it when it passes. A validation
    /// failure keeps the popup open with the field error set and issues no
    /// request.
    pub fn submit_new_account(&mut self) {
        let Some(draft) = self.state.popup.validate() else {
            return;
        };
        self.state.loading_state = LoadingState::Loading("Creating account...".to_string());

        let client = self.client.clone();
        let tx = self.io_tx.clone();
        tokio::spawn(async move {
            let success = client.add_account(&draft).await;
            let _ = tx.send(Event::AccountAdded { success });
        });
    }

    /// DELETE the selected account
    pub fn delete_selected(&mut self) {
        let Some(account) = self.state.selected_account() else {
            return;
        };
        let id = account.id.clone();
        self.state.loading_state = LoadingState::Loading("Deleting account...".to_string());

        let client = self.client.clone();
        let tx = self.io_tx.clone();
        tokio::spawn(async move {
            let success = client.delete_account(&id).await;
            let _ = tx.send(Event::AccountDeleted { id, success });
        });
    }

    /// Reveal the selected row's password, hiding any other revealed row;
    /// selecting the same row again hides it
    pub fn toggle_password_reveal(&mut self) {
        let Some(account) = self.state.selected_account() else {
            return;
        };
        if self.state.revealed_password.as_deref() == Some(account.id.as_str()) {
            self.state.revealed_password = None;
        } else {
            self.state.revealed_password = Some(account.id.clone());
        }
    }

    fn handle_completion(&mut self, event: Event) {
        match event {
            Event::AccountsLoaded(accounts) => {
                self.state.accounts = accounts;
                if self.state.selected >= self.state.accounts.len() {
                    self.state.selected = self.state.accounts.len().saturating_sub(1);
                }
                // A reveal pointing at a row that no longer exists is stale
                if let Some(id) = self.state.revealed_password.clone() {
                    if !self.state.accounts.iter().any(|a| a.id == id) {
                        self.state.revealed_password = None;
                    }
                }
                self.state.loading_state =
                    LoadingState::Success(format!("{} accounts", self.state.accounts.len()));
            }
            Event::AccountAdded { success } => {
                if success {
                    self.state.popup.close_and_clear();
                    self.set_status("Account created".to_string());
                    self.refresh_accounts();
                } else {
                    // Popup stays open with the draft; no field error is set
                    warn!("add account rejected by backend");
                    self.state.loading_state =
                        LoadingState::Error("Failed to add new account".to_string());
                }
            }
            Event::AccountSaved { id, success } => {
                if success {
                    if let Some(draft) = self.state.pending_save.take() {
                        if let Some(row) =
                            self.state.accounts.iter_mut().find(|a| a.id == draft.id)
                        {
                            *row = draft;
                        }
                    }
                    self.state.editor = None;
                    self.set_status(format!("Account {} saved", id));
                    self.refresh_accounts();
                } else {
                    // Not applied: keep the draft and edit mode so nothing
                    // is silently lost
                    warn!(id = %id, "update rejected by backend");
                    self.state.pending_save = None;
                    self.state.loading_state =
                        LoadingState::Error("Failed to update account".to_string());
                }
            }
            Event::AccountDeleted { id, success } => {
                if success {
                    self.set_status(format!("Account {} deleted", id));
                    self.refresh_accounts();
                } else {
                    warn!(id = %id, "delete rejected by backend");
                    self.state.loading_state =
                        LoadingState::Error("Failed to delete account".to_string());
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminConfig;

    fn test_app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(AccountClient::new(AdminConfig::default()), tx)
    }

    fn account(id: &str, firstname: &str) -> Account {
        Account {
            id: id.to_string(),
            firstname: firstname.to_string(),
            lastname: String::new(),
            email: format!("{}@example.com", firstname.to_lowercase()),
            password: "Ab1!23456".to_string(),
            mobileno: "1234567890".to_string(),
        }
    }

    #[tokio::test]
    async fn test_accounts_loaded_replaces_list_wholesale() {
        let mut app = test_app();
        app.state.accounts = vec![account("1", "Old")];
        app.state.selected = 0;

        let loaded = vec![account("2", "Ada"), account("3", "Grace")];
        app.handle_event(Event::AccountsLoaded(loaded.clone()))
            .await
            .unwrap();

        assert_eq!(app.state.accounts, loaded);
    }

    #[tokio::test]
    async fn test_accounts_loaded_clamps_cursor_and_drops_stale_reveal() {
        let mut app = test_app();
        app.state.accounts = vec![account("1", "Ada"), account("2", "Grace")];
        app.state.selected = 1;
        app.state.revealed_password = Some("2".to_string());

        app.handle_event(Event::AccountsLoaded(vec![account("1", "Ada")]))
            .await
            .unwrap();

        assert_eq!(app.state.selected, 0);
        assert!(app.state.revealed_password.is_none());
    }

    #[tokio::test]
    async fn test_invalid_submit_issues_no_request() {
        let mut app = test_app();
        app.state.popup.open();

        // Empty draft: firstname is mandatory
        app.handle_event(Event::Enter).await.unwrap();

        assert!(app.state.popup.is_visible());
        assert_eq!(
            app.state.popup.current_error(),
            Some("firstname is mandatory")
        );
        // No request means no loading state transition
        assert_eq!(app.state.loading_state, LoadingState::Idle);
    }

    #[tokio::test]
    async fn test_backend_add_failure_keeps_popup_open_and_list_unchanged() {
        let mut app = test_app();
        app.state.accounts = vec![account("1", "Ada")];
        app.state.popup.open();

        app.handle_event(Event::AccountAdded { success: false })
            .await
            .unwrap();

        assert!(app.state.popup.is_visible());
        assert_eq!(app.state.accounts.len(), 1);
        // Backend failures never become field errors
        assert!(app.state.popup.current_error().is_none());
        assert!(matches!(app.state.loading_state, LoadingState::Error(_)));
    }

    #[tokio::test]
    async fn test_successful_save_commits_draft_and_clears_edit() {
        let mut app = test_app();
        app.state.accounts = vec![account("1", "Ada")];
        app.state.selected = 0;
        app.begin_edit();

        let mut edited = account("1", "Ada");
        edited.email = "new@example.com".to_string();
        app.state.pending_save = Some(edited.clone());

        app.handle_event(Event::AccountSaved {
            id: "1".to_string(),
            success: true,
        })
        .await
        .unwrap();

        assert!(app.state.editor.is_none());
        assert_eq!(app.state.accounts[0].email, "new@example.com");
    }

    #[tokio::test]
    async fn test_failed_save_keeps_editor_and_original_row() {
        let mut app = test_app();
        app.state.accounts = vec![account("1", "Ada")];
        app.state.selected = 0;
        app.begin_edit();
        app.state.pending_save = Some(account("1", "Changed"));

        app.handle_event(Event::AccountSaved {
            id: "1".to_string(),
            success: false,
        })
        .await
        .unwrap();

        assert!(app.state.editor.is_some());
        assert_eq!(app.state.accounts[0].firstname, "Ada");
        assert!(app.state.pending_save.is_none());
    }

    #[tokio::test]
    async fn test_cancel_edit_discards_draft() {
        let mut app = test_app();
        app.state.accounts = vec![account("1", "Ada")];
        app.state.selected = 0;
        app.begin_edit();

        // Edit a field, then cancel
        if let Some(editor) = app.state.editor.as_mut() {
            editor.handle_event(&Event::Char('X'));
        }
        app.handle_event(Event::Escape).await.unwrap();

        assert!(app.state.editor.is_none());
        assert_eq!(app.state.accounts[0].firstname, "Ada");
    }

    #[tokio::test]
    async fn test_password_reveal_is_exclusive() {
        let mut app = test_app();
        app.state.accounts = vec![account("1", "Ada"), account("2", "Grace")];

        app.state.selected = 0;
        app.toggle_password_reveal();
        assert!(app.state.is_password_revealed("1"));

        // Revealing another row hides the previous one
        app.state.selected = 1;
        app.toggle_password_reveal();
        assert!(!app.state.is_password_revealed("1"));
        assert!(app.state.is_password_revealed("2"));

        // Toggling the same row hides it
        app.toggle_password_reveal();
        assert!(app.state.revealed_password.is_none());
    }

    #[tokio::test]
    async fn test_editor_drafts_from_selected_row() {
        let mut app = test_app();
        app.state.accounts = vec![account("7", "Ada")];
        app.state.selected = 0;
        app.begin_edit();

        let editor = app.state.editor.as_ref().unwrap();
        assert_eq!(editor.id, "7");
        assert_eq!(editor.draft(), app.state.accounts[0]);
    }

    #[tokio::test]
    async fn test_quit_from_table_mode() {
        let mut app = test_app();
        let quit = app.handle_event(Event::Char('q')).await.unwrap();
        assert!(quit);
        assert!(app.state.should_quit);
    }

    #[tokio::test]
    async fn test_q_types_into_popup_instead_of_quitting() {
        let mut app = test_app();
        app.state.popup.open();
        let quit = app.handle_event(Event::Char('q')).await.unwrap();
        assert!(!quit);
        assert_eq!(app.state.popup.draft().firstname, "q");
    }
}
