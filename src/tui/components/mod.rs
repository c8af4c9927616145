//! Reusable TUI components

pub mod forms;
pub mod popup;
pub mod status_bar;
pub mod tables;
