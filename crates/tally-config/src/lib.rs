//! # Tally Config
//!
//! Layered configuration for the Tally server: TOML files, `.env` and
//! `TALLY__` environment variables, with validation and runtime reload.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
