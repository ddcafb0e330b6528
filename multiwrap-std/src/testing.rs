//! Testing utilities for multiwrap.
//!
//! This module provides transforms and observers that record what the
//! dispatcher did, so tests can assert on interception without a logger.
//!
//! # Features
//!
//! - [`CountingTransform`]: counts how many handlers it transformed
//! - [`FailingTransform`]: rejects every handler
//! - [`RecordingObserver`]: records every resolution

use multiwrap_core::{BoxError, DispatchKey, ResolveObserver, Transform};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Counting Transform
// ============================================================================

/// A transform that returns handlers unchanged and counts applications.
///
/// # Example
///
/// ```rust,ignore
/// let counter = CountingTransform::new();
/// let dispatcher = InstrumentingDispatcher::create("m", engine, counter.clone());
///
/// dispatcher.resolve(&key)?;
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CountingTransform {
    count: Arc<AtomicUsize>,
}

impl CountingTransform {
    /// Create a new counting transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of handlers transformed so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<H> Transform<H> for CountingTransform {
    fn apply(&self, handler: H) -> Result<H, BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(handler)
    }
}

// ============================================================================
// Failing Transform
// ============================================================================

/// A transform that rejects every handler with a fixed message.
#[derive(Debug, Clone)]
pub struct FailingTransform {
    message: String,
}

impl FailingTransform {
    /// Create a transform failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl<H> Transform<H> for FailingTransform {
    fn apply(&self, _handler: H) -> Result<H, BoxError> {
        Err(self.message.clone().into())
    }
}

// ============================================================================
// Recording Observer
// ============================================================================

/// An observer that records `(dispatcher, key, found)` for every resolution.
pub struct RecordingObserver<K> {
    records: Arc<Mutex<Vec<(String, K, bool)>>>,
}

impl<K: Clone> RecordingObserver<K> {
    /// Create a new recording observer.
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded resolutions.
    pub fn records(&self) -> Vec<(String, K, bool)> {
        self.records.lock().unwrap().clone()
    }

    /// Get the number of recorded resolutions.
    pub fn count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Clear all records.
    pub fn clear(&self) {
        self.records.lock().unwrap().clear();
    }
}

impl<K: Clone> Default for RecordingObserver<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for RecordingObserver<K> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

impl<K: DispatchKey> ResolveObserver<K> for RecordingObserver<K> {
    fn on_resolve(&self, dispatcher: &str, key: &K, found: bool) {
        self.records
            .lock()
            .unwrap()
            .push((dispatcher.to_string(), key.clone(), found));
    }
}
