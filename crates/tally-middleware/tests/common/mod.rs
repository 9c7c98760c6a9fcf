//! Shared fixtures for access log integration tests.

use axum::body::Body;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::Router;
use futures::stream;
use hyper::body::Bytes;
use std::convert::Infallible;
use tally_core::{AccessLogConfig, LogRecord, MemorySink};
use tally_middleware::AccessLogLayer;

/// Number of chunks served by `/stream`.
pub const STREAM_CHUNKS: usize = 4;

/// Size of each chunk served by `/stream`.
pub const CHUNK_SIZE: usize = 1024;

pub fn chunked_body(chunks: usize, size: usize) -> Body {
    Body::from_stream(stream::iter(
        (0..chunks).map(move |_| Ok::<_, Infallible>(Bytes::from(vec![b'x'; size]))),
    ))
}

/// Demo router wrapped in an access log layer that records into memory.
pub fn app(config: AccessLogConfig) -> (Router, MemorySink) {
    let sink = MemorySink::new();
    let router = Router::new()
        .route("/hello", get(|| async { "hello" }))
        .route("/empty", get(|| async { Body::empty() }))
        .route("/stream", get(|| async { chunked_body(STREAM_CHUNKS, CHUNK_SIZE) }))
        .route(
            "/no-content",
            post(|| async { (StatusCode::NO_CONTENT, chunked_body(1, 1024)) }),
        )
        .route("/items/:id", delete(|| async { StatusCode::OK }))
        .route("/broken", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
        .route("/health", get(|| async { "ok" }))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(AccessLogLayer::new(config).with_sink(sink.clone()));
    (router, sink)
}

/// Splits a record's message into its space-separated fields.
pub fn fields(record: &LogRecord) -> Vec<String> {
    record.message.split(' ').map(String::from).collect()
}
