//! Destinations for access log records.

use crate::{Level, LogRecord};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Accepts finished access log records.
///
/// Sinks are fire-and-forget: the logger never inspects what a sink does with
/// a record.
pub trait LogSink: Send + Sync {
    /// Consumes one record.
    fn log(&self, record: &LogRecord);
}

impl<T: LogSink + ?Sized> LogSink for Arc<T> {
    fn log(&self, record: &LogRecord) {
        (**self).log(record);
    }
}

/// Forwards records to `tracing` under the `tally::access` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&self, record: &LogRecord) {
        match record.level {
            Level::Info => info!(target: "tally::access", category = %record.category, "{}", record.message),
            Level::Warning => warn!(target: "tally::access", category = %record.category, "{}", record.message),
            Level::Error => error!(target: "tally::access", category = %record.category, "{}", record.message),
        }
    }
}

/// Keeps records in memory, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the records received so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Returns the number of records received so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Returns true if nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Removes and returns all records.
    pub fn drain(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl LogSink for MemorySink {
    fn log(&self, record: &LogRecord) {
        self.records.lock().push(record.clone());
    }
}
