//! Command-line adapter for the loan application wizard.

pub mod answers;
pub mod app;
pub mod config;
pub mod local_store;
pub mod logging;
