//! Instrumenting dispatchers.
//!
//! An [`InstrumentingDispatcher`] presents the same [`DispatchEngine`]
//! contract as the engine it wraps and intercepts exactly one thing: the
//! handler returned by a successful resolution.
//!
//! [`DispatchEngine`]: multiwrap_core::DispatchEngine

pub mod builder;
pub mod dispatcher;

pub use builder::InstrumentingDispatcherBuilder;
pub use dispatcher::InstrumentingDispatcher;
