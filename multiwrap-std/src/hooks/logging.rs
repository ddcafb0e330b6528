//! Logging Transform - one log line per handler invocation.

use crate::async_method::AsyncMethod;
use multiwrap_core::{BoxError, Method, Transform};

/// A transform that logs every invocation of the resolved handler.
///
/// The wrapped handler behaves exactly like the original; it only emits a
/// `debug!` line through `tracing` before delegating. Without the `tracing`
/// feature the wrapper is a plain pass-through.
///
/// # Example
///
/// ```rust,ignore
/// use multiwrap::{InstrumentingDispatcher, LoggingTransform, TableEngine};
///
/// let dispatcher = InstrumentingDispatcher::create(
///     "area",
///     TableEngine::new("area"),
///     LoggingTransform::named("area"),
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LoggingTransform {
    name: &'static str,
}

impl LoggingTransform {
    /// Create a new `LoggingTransform` with a default name.
    pub fn new() -> Self {
        Self { name: "method" }
    }

    /// Create a new `LoggingTransform` with a custom name.
    ///
    /// The name is used in log messages to identify the multimethod.
    pub fn named(name: &'static str) -> Self {
        Self { name }
    }

    /// The name used in log messages.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for LoggingTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, R> Transform<Method<A, R>> for LoggingTransform
where
    A: 'static,
    R: 'static,
{
    fn apply(&self, handler: Method<A, R>) -> Result<Method<A, R>, BoxError> {
        let name = self.name;
        Ok(Method::new(move |args| {
            #[cfg(feature = "tracing")]
            {
                tracing::debug!(method = %name, "invoking method");
            }

            #[cfg(not(feature = "tracing"))]
            {
                let _ = name; // Suppress unused warning
            }

            handler.call(args)
        }))
    }
}

impl<A, R> Transform<AsyncMethod<A, R>> for LoggingTransform
where
    A: 'static,
    R: 'static,
{
    fn apply(&self, handler: AsyncMethod<A, R>) -> Result<AsyncMethod<A, R>, BoxError> {
        let name = self.name;
        Ok(AsyncMethod::new(move |args| {
            #[cfg(feature = "tracing")]
            {
                tracing::debug!(method = %name, "invoking async method");
            }

            #[cfg(not(feature = "tracing"))]
            {
                let _ = name;
            }

            handler.call(args)
        }))
    }
}
