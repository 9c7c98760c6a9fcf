//! Demo routes behind the access log.

use axum::body::{Body, Bytes};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::Router;
use futures::stream;
use serde::Deserialize;
use std::convert::Infallible;
use tally_config::AppConfig;
use tally_middleware::AccessLogLayer;
use tower_http::compression::CompressionLayer;

const MAX_CHUNKS: usize = 1024;

#[derive(Debug, Deserialize)]
pub struct StreamParams {
    #[serde(default = "default_chunks")]
    chunks: usize,
    #[serde(default = "default_chunk_size")]
    size: usize,
}

fn default_chunks() -> usize {
    4
}

fn default_chunk_size() -> usize {
    1024
}

/// Builds the router with the access log layer configured from `config`.
pub fn build_router(config: &AppConfig) -> Router {
    build_router_with(AccessLogLayer::new(config.access_log.clone()))
}

/// Builds the router around a preconfigured access log layer.
///
/// The access log wraps compression, so sizes are what goes on the wire.
pub fn build_router_with(access_log: AccessLogLayer) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/stream", get(stream_chunks))
        .route("/echo", post(echo))
        .route("/items/:id", delete(delete_item))
        .route("/fail", get(fail))
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(access_log)
}

async fn index() -> &'static str {
    "Tally access log demo\n"
}

async fn health() -> &'static str {
    "ok"
}

/// Streams `chunks` chunks of `size` bytes with no declared length.
async fn stream_chunks(Query(params): Query<StreamParams>) -> Body {
    let chunks = params.chunks.min(MAX_CHUNKS);
    let size = params.size;
    Body::from_stream(stream::iter(
        (0..chunks).map(move |_| Ok::<_, Infallible>(Bytes::from(vec![b'.'; size]))),
    ))
}

async fn echo(body: Bytes) -> Bytes {
    body
}

async fn delete_item(Path(_id): Path<u64>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn fail() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "something broke")
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, Request};
    use http_body_util::BodyExt;
    use tally_core::{format_size, AccessLogConfig, Level, MemorySink};
    use tower::ServiceExt;

    fn app(config: AccessLogConfig) -> (Router, MemorySink) {
        let sink = MemorySink::new();
        let router = build_router_with(AccessLogLayer::new(config).with_sink(sink.clone()));
        (router, sink)
    }

    fn request(method: Method, uri: &str, body: Body) -> Request<Body> {
        Request::builder().method(method).uri(uri).body(body).unwrap()
    }

    #[tokio::test]
    async fn test_stream_route_is_measured() {
        let (router, sink) = app(AccessLogConfig::default());

        let response = router
            .oneshot(request(Method::GET, "/stream?chunks=3&size=100", Body::empty()))
            .await
            .unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.len(), 300);

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert!(records[0].message.ends_with(&format_size(300)));
    }

    #[tokio::test]
    async fn test_echo_route() {
        let (router, sink) = app(AccessLogConfig::default());

        let response = router
            .oneshot(request(Method::POST, "/echo", Body::from("ping")))
            .await
            .unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        assert_eq!(&bytes[..], b"ping");
        assert_eq!(sink.records()[0].level, Level::Info);
    }

    #[tokio::test]
    async fn test_delete_has_no_size() {
        let (router, sink) = app(AccessLogConfig::default());

        let response = router
            .oneshot(request(Method::DELETE, "/items/9", Body::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        drop(response);

        let record = &sink.records()[0];
        assert_eq!(record.level, Level::Info);
        assert!(record.message.ends_with(' '));
    }

    #[tokio::test]
    async fn test_fail_route_logs_error() {
        let (router, sink) = app(AccessLogConfig::default());

        let response = router
            .oneshot(request(Method::GET, "/fail", Body::empty()))
            .await
            .unwrap();
        response.into_body().collect().await.unwrap();

        assert_eq!(sink.records()[0].level, Level::Error);
    }

    #[tokio::test]
    async fn test_health_can_be_excluded() {
        let config = AccessLogConfig {
            exclude_paths: vec!["/health".to_string()],
            ..AccessLogConfig::default()
        };
        let (router, sink) = app(config);

        let response = router
            .oneshot(request(Method::GET, "/health", Body::empty()))
            .await
            .unwrap();
        response.into_body().collect().await.unwrap();

        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route_warns() {
        let (router, sink) = app(AccessLogConfig::default());

        drop(
            router
                .oneshot(request(Method::GET, "/nope", Body::empty()))
                .await
                .unwrap(),
        );

        assert_eq!(sink.records()[0].level, Level::Warning);
    }
}
