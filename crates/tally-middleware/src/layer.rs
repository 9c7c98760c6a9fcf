//! Tower layer applying access logging to a service.

use crate::{original_uri, AccessLogger, RequestContext};
use axum::body::Body;
use axum::http::{Request, Response};
use axum::BoxError;
use futures::future::BoxFuture;
use hyper::body::{Body as HttpBody, Bytes};
use std::fmt;
use std::task::{Context, Poll};
use tally_core::{AccessLogConfig, Decorator, LogSink};
use tower::{Layer, Service};

/// Layer producing [`AccessLog`] services.
#[derive(Debug, Clone)]
pub struct AccessLogLayer {
    logger: AccessLogger,
}

impl AccessLogLayer {
    pub fn new(config: AccessLogConfig) -> Self {
        Self {
            logger: AccessLogger::new(config),
        }
    }

    /// Sends records to `sink` instead of `tracing`.
    #[must_use]
    pub fn with_sink<T: LogSink + 'static>(mut self, sink: T) -> Self {
        self.logger = self.logger.with_sink(sink);
        self
    }

    #[must_use]
    pub fn with_decorator<T: Decorator + 'static>(mut self, decorator: T) -> Self {
        self.logger = self.logger.with_decorator(decorator);
        self
    }

    pub fn logger(&self) -> &AccessLogger {
        &self.logger
    }
}

impl Default for AccessLogLayer {
    fn default() -> Self {
        Self::new(AccessLogConfig::default())
    }
}

impl<S> Layer<S> for AccessLogLayer {
    type Service = AccessLog<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessLog {
            inner,
            logger: self.logger.clone(),
        }
    }
}

/// Access logging middleware.
///
/// A successful response is logged once its body finishes or is dropped. An
/// error from the inner service is logged immediately and returned unchanged.
#[derive(Debug, Clone)]
pub struct AccessLog<S> {
    inner: S,
    logger: AccessLogger,
}

impl<S> AccessLog<S> {
    pub fn new(inner: S, logger: AccessLogger) -> Self {
        Self { inner, logger }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for AccessLog<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: fmt::Display + fmt::Debug + Send + 'static,
    ResBody: HttpBody<Data = Bytes> + Send + 'static,
    ResBody::Error: Into<BoxError>,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        if self.logger.config().is_excluded(original_uri(&req).path()) {
            let future = self.inner.call(req);
            return Box::pin(async move { future.await.map(|res| res.map(Body::new)) });
        }

        let ctx = RequestContext::from_request(&req);
        let logger = self.logger.clone();
        let future = self.inner.call(req);

        Box::pin(async move {
            match future.await {
                Ok(response) => Ok(logger.observe(ctx, response)),
                Err(err) => {
                    logger.log_failure(&ctx, &err);
                    Err(err)
                }
            }
        })
    }
}
