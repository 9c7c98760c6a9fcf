//! Response body that reports its own completion.

use crate::CompletionArbiter;
use hyper::body::{Body, Frame, SizeHint};
use pin_project::{pin_project, pinned_drop};
use std::pin::Pin;
use std::task::{Context, Poll};

/// [`Body`] wrapper that delivers completion signals to an arbiter.
///
/// Reaching the end of the inner body is "finish". Being dropped before the
/// end, because the connection went away or the server gave up on the body,
/// is "close". A body that is already at its end when dropped counts as
/// finished, which covers empty bodies the server never polls.
#[pin_project(PinnedDrop)]
#[derive(Debug)]
pub struct ObservedBody<B> {
    #[pin]
    inner: B,
    arbiter: CompletionArbiter,
    ended: bool,
}

impl<B: Body> ObservedBody<B> {
    /// Wraps `inner`, reporting to `arbiter`.
    pub fn new(inner: B, arbiter: CompletionArbiter) -> Self {
        let ended = inner.is_end_stream();
        Self {
            inner,
            arbiter,
            ended,
        }
    }
}

impl<B> ObservedBody<B> {
    /// Returns the arbiter this body reports to.
    pub fn arbiter(&self) -> &CompletionArbiter {
        &self.arbiter
    }
}

impl<B: Body> Body for ObservedBody<B> {
    type Data = B::Data;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let mut this = self.project();
        let poll = this.inner.as_mut().poll_frame(cx);

        let finished = match &poll {
            Poll::Ready(None) => true,
            Poll::Ready(Some(Ok(_))) => this.inner.is_end_stream(),
            _ => false,
        };
        if finished {
            *this.ended = true;
            this.arbiter.finish();
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

#[pinned_drop]
impl<B> PinnedDrop for ObservedBody<B> {
    fn drop(self: Pin<&mut Self>) {
        let this = self.project();
        if *this.ended {
            this.arbiter.finish();
        } else {
            this.arbiter.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArbiterState, ByteCounter, CompletionSignal, CountingBody};
    use futures::stream;
    use http_body_util::{BodyExt, Empty, Full, StreamBody};
    use hyper::body::Bytes;
    use parking_lot::Mutex;
    use std::convert::Infallible;
    use std::sync::Arc;

    type Fired = Arc<Mutex<Vec<(CompletionSignal, u64)>>>;

    fn arbiter_reading(counter: ByteCounter) -> (CompletionArbiter, Fired) {
        let fired: Fired = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();
        let arbiter = CompletionArbiter::arm(move |signal| {
            sink.lock().push((signal, counter.get()));
        });
        (arbiter, fired)
    }

    fn chunks(n: usize, size: usize) -> StreamBody<impl futures::Stream<Item = Result<Frame<Bytes>, Infallible>>> {
        StreamBody::new(stream::iter(
            (0..n).map(move |_| Ok(Frame::data(Bytes::from(vec![0u8; size])))),
        ))
    }

    #[tokio::test]
    async fn test_stream_end_is_finish() {
        let counter = ByteCounter::new();
        let (arbiter, fired) = arbiter_reading(counter.clone());
        let body = ObservedBody::new(CountingBody::with_counter(chunks(4, 1024), counter), arbiter.clone());

        body.collect().await.unwrap();

        assert_eq!(*fired.lock(), vec![(CompletionSignal::Finish, 4096)]);
        assert_eq!(arbiter.state(), ArbiterState::Fired);
    }

    #[tokio::test]
    async fn test_early_drop_is_close_with_partial_count() {
        let counter = ByteCounter::new();
        let (arbiter, fired) = arbiter_reading(counter.clone());
        let mut body = ObservedBody::new(CountingBody::with_counter(chunks(4, 100), counter), arbiter.clone());

        let frame = body.frame().await.unwrap().unwrap();
        assert_eq!(frame.into_data().unwrap().len(), 100);
        drop(body);

        assert_eq!(*fired.lock(), vec![(CompletionSignal::Close, 100)]);

        // A late finish must not produce a second call.
        assert!(!arbiter.finish());
        assert_eq!(fired.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_full_body_finishes_on_last_frame() {
        let (arbiter, fired) = arbiter_reading(ByteCounter::new());
        let mut body = ObservedBody::new(Full::new(Bytes::from_static(b"hello")), arbiter.clone());

        let _ = body.frame().await.unwrap().unwrap();
        assert_eq!(arbiter.fired_by(), Some(CompletionSignal::Finish));

        drop(body);
        assert_eq!(fired.lock().len(), 1);
    }

    #[test]
    fn test_unpolled_empty_body_counts_as_finished() {
        let (arbiter, fired) = arbiter_reading(ByteCounter::new());
        let body = ObservedBody::new(Empty::<Bytes>::new(), arbiter);

        drop(body);

        assert_eq!(*fired.lock(), vec![(CompletionSignal::Finish, 0)]);
    }

    #[test]
    fn test_unpolled_stream_drop_is_close() {
        let (arbiter, fired) = arbiter_reading(ByteCounter::new());
        let body = ObservedBody::new(chunks(2, 10), arbiter);

        drop(body);

        assert_eq!(*fired.lock(), vec![(CompletionSignal::Close, 0)]);
    }

    #[test]
    fn test_hints_delegate_to_inner() {
        let (arbiter, _) = arbiter_reading(ByteCounter::new());
        let body = ObservedBody::new(Full::new(Bytes::from_static(b"abcd")), arbiter);
        assert_eq!(body.size_hint().exact(), Some(4));
        assert!(!body.is_end_stream());
    }
}
