//! Per-request state captured before the inner service runs.

use crate::client_address;
use axum::extract::OriginalUri;
use axum::http::{Method, Request, Uri};
use std::time::{Duration, Instant};

/// What the access logger knows about a request before it has a response.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    uri: String,
    address: String,
    start: Instant,
}

impl RequestContext {
    /// Captures method, original URI, client address and the start instant.
    pub fn from_request<B>(req: &Request<B>) -> Self {
        let original = original_uri(req);
        let uri = original
            .path_and_query()
            .map_or_else(|| original.path().to_string(), ToString::to_string);
        Self::new(req.method().clone(), uri, client_address(req))
    }

    /// Creates a context starting now.
    pub fn new(method: Method, uri: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            address: address.into(),
            start: Instant::now(),
        }
    }

    /// Request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Path and query as received.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Resolved client address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Time since the request entered the logger.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// URI as received by the outermost router.
///
/// Nested routers strip their mount prefix from `req.uri()`; axum keeps the
/// unmodified URI in the [`OriginalUri`] extension.
pub fn original_uri<B>(req: &Request<B>) -> &Uri {
    req.extensions()
        .get::<OriginalUri>()
        .map_or_else(|| req.uri(), |OriginalUri(uri)| uri)
}
