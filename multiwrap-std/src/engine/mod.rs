//! Reference dispatch engine.
//!
//! [`TableEngine`] is a small in-memory engine with hierarchy-aware,
//! preference-respecting resolution. It exists so dispatchers and
//! multimethods have a real engine to delegate to; any other
//! [`DispatchEngine`](multiwrap_core::DispatchEngine) works the same way.

pub mod hierarchy;
pub mod table;

pub use hierarchy::{Hierarchy, SharedHierarchy};
pub use table::{TableEngine, TableEngineBuilder};
