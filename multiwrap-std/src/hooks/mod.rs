//! Standard interception hooks: transforms and observers.

pub mod logging;
pub mod tracing;

pub use logging::LoggingTransform;
pub use self::tracing::TracingObserver;
