pub mod account;
pub mod client;
pub mod config;
pub mod error;
pub mod validator;

// TUI module - optional via "tui" feature
#[cfg(feature = "tui")]
pub mod tui;

pub use account::{Account, AccountDraft};
pub use client::AccountClient;
pub use config::{AdminConfig, ApiRoot};
pub use error::Error;

// Re-export TUI entry point when feature is enabled
#[cfg(feature = "tui")]
pub use tui::run_tui;
