//! # Tally Core
//!
//! Record types, classification, formatting and sinks for the Tally HTTP
//! access logger. Nothing in this crate touches a request or a body; the
//! middleware crate feeds it raw method, status, elapsed time and length.

pub mod classify;
pub mod config;
pub mod decorate;
pub mod error;
pub mod format;
pub mod record;
pub mod result;
pub mod sink;

pub use classify::*;
pub use config::*;
pub use decorate::*;
pub use error::*;
pub use format::*;
pub use record::*;
pub use result::*;
pub use sink::*;
