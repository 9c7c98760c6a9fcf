//! Single-fire arbitration between response completion signals.

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::trace;

/// Which event ended the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionSignal {
    /// The body was transmitted to the end.
    Finish,
    /// The body was dropped before its end, e.g. the connection closed.
    Close,
}

impl fmt::Display for CompletionSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finish => write!(f, "finish"),
            Self::Close => write!(f, "close"),
        }
    }
}

/// Arbiter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ArbiterState {
    /// Waiting for the first completion signal.
    Armed = 0,
    /// A signal has been delivered. Terminal.
    Fired = 1,
}

impl From<u8> for ArbiterState {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Armed,
            _ => Self::Fired,
        }
    }
}

type Finalizer = Box<dyn FnOnce(CompletionSignal) + Send>;

struct ArbiterInner {
    state: AtomicU8,
    fired_by: Mutex<Option<CompletionSignal>>,
    finalizer: Mutex<Option<Finalizer>>,
}

/// Guarantees that at most one of the "finish" and "close" signals runs the
/// finalizer.
///
/// The transition out of [`ArbiterState::Armed`] is a single compare-and-swap,
/// so concurrent, reentrant or repeated signals cannot run the finalizer
/// twice. The winner takes the finalizer out of its slot before calling it,
/// which leaves nothing behind for the losing signal. If no signal ever
/// arrives the arbiter stays armed and the finalizer never runs.
///
/// Clones share state.
#[derive(Clone)]
pub struct CompletionArbiter {
    inner: Arc<ArbiterInner>,
}

impl CompletionArbiter {
    /// Creates an armed arbiter that will call `finalizer` on the first
    /// signal.
    pub fn arm<F>(finalizer: F) -> Self
    where
        F: FnOnce(CompletionSignal) + Send + 'static,
    {
        Self {
            inner: Arc::new(ArbiterInner {
                state: AtomicU8::new(ArbiterState::Armed as u8),
                fired_by: Mutex::new(None),
                finalizer: Mutex::new(Some(Box::new(finalizer))),
            }),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> ArbiterState {
        ArbiterState::from(self.inner.state.load(Ordering::Acquire))
    }

    /// Returns the signal that fired the arbiter, if any.
    pub fn fired_by(&self) -> Option<CompletionSignal> {
        *self.inner.fired_by.lock()
    }

    /// Delivers the "finish" signal.
    pub fn finish(&self) -> bool {
        self.fire(CompletionSignal::Finish)
    }

    /// Delivers the "close" signal.
    pub fn close(&self) -> bool {
        self.fire(CompletionSignal::Close)
    }

    /// Delivers `signal`. Returns true if this call fired the arbiter.
    pub fn fire(&self, signal: CompletionSignal) -> bool {
        if self
            .inner
            .state
            .compare_exchange(
                ArbiterState::Armed as u8,
                ArbiterState::Fired as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            trace!(%signal, "Completion signal ignored, arbiter already fired");
            return false;
        }

        *self.inner.fired_by.lock() = Some(signal);
        // Lock released before the call so a reentrant signal only sees Fired.
        let finalizer = self.inner.finalizer.lock().take();
        if let Some(finalizer) = finalizer {
            finalizer(signal);
        }
        true
    }
}

impl fmt::Debug for CompletionArbiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionArbiter")
            .field("state", &self.state())
            .field("fired_by", &self.fired_by())
            .finish()
    }
}
