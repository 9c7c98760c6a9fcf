//! # Tally Middleware
//!
//! Access logging for axum and any tower service speaking `http` types.
//!
//! Wrap a service with [`AccessLogLayer`]. Every request produces exactly one
//! record: on a response, once the body finishes or is dropped; on a service
//! error, immediately, with the error handed back to the caller.
//!
//! ```no_run
//! use axum::{routing::get, Router};
//! use tally_core::AccessLogConfig;
//! use tally_middleware::AccessLogLayer;
//!
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "hello" }))
//!     .layer(AccessLogLayer::new(AccessLogConfig::default()));
//! ```

pub mod address;
pub mod arbiter;
pub mod body;
pub mod context;
pub mod counter;
pub mod layer;
pub mod logger;

pub use address::*;
pub use arbiter::*;
pub use body::*;
pub use context::*;
pub use counter::*;
pub use layer::*;
pub use logger::*;
