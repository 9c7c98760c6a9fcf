//! Passthrough byte counting for response bodies.

use hyper::body::{Body, Buf, Frame, SizeHint};
use pin_project::pin_project;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// Shared running total of bytes seen by a [`CountingBody`].
///
/// Clones observe the same total. The value is only final once the body has
/// ended, errored or been dropped.
#[derive(Debug, Clone, Default)]
pub struct ByteCounter {
    total: Arc<AtomicU64>,
}

impl ByteCounter {
    /// Creates a counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of bytes counted so far.
    #[must_use]
    pub fn get(&self) -> u64 {
        self.total.load(Ordering::Acquire)
    }

    fn add(&self, len: usize) {
        self.total.fetch_add(len as u64, Ordering::AcqRel);
    }
}

/// [`Body`] wrapper that tallies data bytes without altering them.
///
/// Frames are yielded exactly as the inner body produces them, in the same
/// poll. Trailers add nothing to the count. Inner errors are returned
/// unchanged.
#[pin_project]
#[derive(Debug)]
pub struct CountingBody<B> {
    #[pin]
    inner: B,
    counter: ByteCounter,
}

impl<B> CountingBody<B> {
    /// Wraps `inner` with a fresh counter.
    pub fn new(inner: B) -> Self {
        Self::with_counter(inner, ByteCounter::new())
    }

    /// Wraps `inner`, adding to an existing counter.
    pub fn with_counter(inner: B, counter: ByteCounter) -> Self {
        Self { inner, counter }
    }

    /// Returns a handle to the running total.
    pub fn counter(&self) -> &ByteCounter {
        &self.counter
    }

    /// Unwraps the inner body.
    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: Body> Body for CountingBody<B> {
    type Data = B::Data;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.project();
        let poll = this.inner.poll_frame(cx);

        if let Poll::Ready(Some(Ok(frame))) = &poll {
            if let Some(data) = frame.data_ref() {
                this.counter.add(data.remaining());
            }
        }

        poll
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}
