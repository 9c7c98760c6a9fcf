//! Record construction and response observation.

use crate::{ByteCounter, CompletionArbiter, CountingBody, ObservedBody, RequestContext};
use axum::body::Body;
use axum::http::{header::CONTENT_LENGTH, HeaderMap, Response};
use axum::BoxError;
use hyper::body::{Body as HttpBody, Bytes};
use std::fmt;
use std::sync::Arc;
use tally_core::{
    classify, format_duration, size_field, AccessLogConfig, AnsiDecorator, Decorator, Level,
    LogRecord, LogSink, PlainDecorator, TracingSink,
};
use tracing::trace;

/// Status field of a failure line; no response exists to take one from.
const NO_STATUS: &str = "-";

/// Builds access log records and hands them to a sink.
///
/// Cheap to clone; every request's finalizer holds one.
#[derive(Clone)]
pub struct AccessLogger {
    config: Arc<AccessLogConfig>,
    sink: Arc<dyn LogSink>,
    decorator: Arc<dyn Decorator>,
}

impl AccessLogger {
    /// Creates a logger writing to `tracing`, colored if `config.colors` is
    /// set.
    pub fn new(config: AccessLogConfig) -> Self {
        let decorator: Arc<dyn Decorator> = if config.colors {
            Arc::new(AnsiDecorator)
        } else {
            Arc::new(PlainDecorator)
        };
        Self {
            config: Arc::new(config),
            sink: Arc::new(TracingSink),
            decorator,
        }
    }

    /// Replaces the sink.
    #[must_use]
    pub fn with_sink<T: LogSink + 'static>(mut self, sink: T) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Replaces the decorator.
    #[must_use]
    pub fn with_decorator<T: Decorator + 'static>(mut self, decorator: T) -> Self {
        self.decorator = Arc::new(decorator);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &AccessLogConfig {
        &self.config
    }

    /// Builds the record for a completed response:
    /// `{address} {status} {method} {path} {duration} {size}`.
    pub fn success_record(&self, ctx: &RequestContext, status: u16, len: Option<u64>) -> LogRecord {
        let classification = classify(ctx.method(), Some(status));
        let method = self
            .decorator
            .method(ctx.method().as_str(), classification.method);
        let status_token = match classification.status {
            Some(class) => self.decorator.status(&status.to_string(), class),
            None => status.to_string(),
        };

        let message = format!(
            "{} {} {} {} {} {}",
            ctx.address(),
            status_token,
            method,
            ctx.uri(),
            format_duration(ctx.elapsed()),
            size_field(status, len),
        );
        LogRecord::new(classification.level, self.config.category.as_str(), message)
    }

    /// Builds the record for a failed pipeline:
    /// `{address} {method} {path} {status} {duration} {detail}`.
    ///
    /// Detail is the error's `Display` in production and its `Debug`
    /// otherwise.
    pub fn failure_record<E>(&self, ctx: &RequestContext, err: &E) -> LogRecord
    where
        E: fmt::Display + fmt::Debug + ?Sized,
    {
        let detail = if self.config.mode.is_production() {
            err.to_string()
        } else {
            format!("{err:?}")
        };

        let message = format!(
            "{} {} {} {} {} {}",
            ctx.address(),
            ctx.method(),
            ctx.uri(),
            NO_STATUS,
            format_duration(ctx.elapsed()),
            detail,
        );
        LogRecord::new(Level::Error, self.config.category.as_str(), message)
    }

    /// Emits the record for a completed response.
    pub fn log_success(&self, ctx: &RequestContext, status: u16, len: Option<u64>) {
        self.sink.log(&self.success_record(ctx, status, len));
    }

    /// Emits the record for a failed pipeline.
    pub fn log_failure<E>(&self, ctx: &RequestContext, err: &E)
    where
        E: fmt::Display + fmt::Debug + ?Sized,
    {
        self.sink.log(&self.failure_record(ctx, err));
    }

    /// Arms completion logging on a response.
    ///
    /// Streaming bodies without a declared length get a byte counter. The
    /// record is emitted once, when the body finishes or is dropped.
    pub fn observe<B>(&self, ctx: RequestContext, response: Response<B>) -> Response<Body>
    where
        B: HttpBody<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = response.into_parts();
        let status = parts.status.as_u16();
        let declared = declared_length(&parts.headers, &body);
        let counter = (declared.is_none() && is_stream(&body)).then(ByteCounter::new);

        let logger = self.clone();
        let measured = counter.clone();
        let arbiter = CompletionArbiter::arm(move |signal| {
            let len = measured.as_ref().map(ByteCounter::get).or(declared);
            trace!(%signal, ?len, "Response completed");
            logger.log_success(&ctx, status, len);
        });

        let body = match counter {
            Some(counter) => Body::new(ObservedBody::new(
                CountingBody::with_counter(body, counter),
                arbiter,
            )),
            None => Body::new(ObservedBody::new(body, arbiter)),
        };
        Response::from_parts(parts, body)
    }
}

impl fmt::Debug for AccessLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessLogger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Length known before transmission: the `Content-Length` header, else the
/// exact size of a fixed, non-empty body.
fn declared_length<B: HttpBody>(headers: &HeaderMap, body: &B) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .or_else(|| {
            if body.is_end_stream() {
                None
            } else {
                body.size_hint().exact()
            }
        })
}

fn is_stream<B: HttpBody>(body: &B) -> bool {
    !body.is_end_stream() && body.size_hint().exact().is_none()
}
