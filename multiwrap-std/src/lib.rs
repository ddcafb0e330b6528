//! # multiwrap-std
//!
//! Standard implementations for the multiwrap instrumenting dispatch registry.
//!
//! This crate provides:
//! - **Reference engine**: [`TableEngine`](engine::TableEngine) with a shared
//!   [`Hierarchy`](engine::Hierarchy)
//! - **Instrumentation**: [`InstrumentingDispatcher`](instrument::InstrumentingDispatcher)
//! - **Multimethods**: [`MultiMethod`](multimethod::MultiMethod)
//! - **Standard hooks**: Logging transform, tracing observer
//! - **Testing helpers**: counting and recording hooks

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use multiwrap_core;

// Modules
pub mod async_method;
pub mod engine;
pub mod hooks;
pub mod instrument;
pub mod multimethod;
pub mod testing;
