//! # Vantage
//!
//! Application layer for the Vantage assessment: the CLI, config loading,
//! and the terminal wizard that drives `vantage-core`.

pub mod cli;
pub mod config;
pub mod terminal;
