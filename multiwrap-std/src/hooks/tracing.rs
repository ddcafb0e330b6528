//! Resolution tracing.

use multiwrap_core::{DispatchKey, ResolveObserver};

/// An observer that emits one `trace!` event per resolution.
///
/// Without the `tracing` feature this observer does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<K: DispatchKey> ResolveObserver<K> for TracingObserver {
    #[cfg(feature = "tracing")]
    fn on_resolve(&self, dispatcher: &str, key: &K, found: bool) {
        tracing::trace!(dispatcher = %dispatcher, key = ?key, found, "resolve method");
    }

    #[cfg(not(feature = "tracing"))]
    fn on_resolve(&self, dispatcher: &str, key: &K, found: bool) {
        let _ = (dispatcher, key, found);
    }
}
