//! Command handlers.

pub mod config;
pub mod favorites;
pub mod generate;
pub mod history;
pub mod types;
