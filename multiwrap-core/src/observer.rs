//! Resolution observers.
//!
//! An observer is told about every resolution an instrumenting dispatcher
//! performs. It cannot change the outcome.

use crate::key::DispatchKey;

/// Receives a notification for every resolution.
pub trait ResolveObserver<K: DispatchKey>: Send + Sync {
    /// Called after the engine answered, before the transform runs.
    fn on_resolve(&self, dispatcher: &str, key: &K, found: bool);
}

/// An observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<K: DispatchKey> ResolveObserver<K> for NoopObserver {
    #[inline]
    fn on_resolve(&self, _dispatcher: &str, _key: &K, _found: bool) {}
}

impl<K, F> ResolveObserver<K> for F
where
    K: DispatchKey,
    F: Fn(&str, &K, bool) + Send + Sync,
{
    fn on_resolve(&self, dispatcher: &str, key: &K, found: bool) {
        (self)(dispatcher, key, found)
    }
}
