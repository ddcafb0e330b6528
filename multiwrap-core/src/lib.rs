//! # multiwrap-core
//!
//! Core traits for the multiwrap instrumenting dispatch registry.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! engines and transforms that don't need the full `multiwrap-std`
//! implementation.
//!
//! # Layers
//!
//! ## Keys ([`DispatchKey`])
//!
//! Opaque, hashable values computed from call arguments. [`Keyword`] is the
//! namespaced symbolic key used throughout the standard crates.
//!
//! ## Engines ([`DispatchEngine`])
//!
//! Own the method table and the preference table and decide which handler
//! serves a key. Hierarchy, ambiguity and preference rules live here and
//! nowhere else.
//!
//! ## Interception ([`Transform`], [`ResolveObserver`])
//!
//! A transform maps every resolved handler to the handler the caller invokes.
//! An observer is notified of every resolution. Neither can change which
//! handler is selected.
//!
//! # Error Types
//!
//! - [`MultiwrapError`] - Top-level error type
//! - [`DispatchError`] - Resolution and table mutation errors
//! - [`HierarchyError`] - Hierarchy editing errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod engine;
mod error;
mod key;
mod method;
mod observer;
mod transform;

// Re-exports
pub use engine::{DispatchEngine, MethodTable, PreferTable};
pub use error::{BoxError, DispatchError, HierarchyError, MultiwrapError};
pub use key::{DispatchKey, Keyword};
pub use method::Method;
pub use observer::{NoopObserver, ResolveObserver};
pub use transform::{Identity, Transform, TryTransform};
