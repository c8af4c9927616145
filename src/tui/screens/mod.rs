//! Screen rendering

pub mod accounts;
