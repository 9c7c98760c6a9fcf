//! # Tally Server Library
//!
//! Router, subscriber setup and startup helpers for the demo server that
//! fronts its routes with the access log middleware.

pub mod app;
pub mod logging;
pub mod startup;

pub use app::*;
pub use logging::*;
pub use startup::*;
