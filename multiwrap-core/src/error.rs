//! Error types for multiwrap.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`MultiwrapError`] - Top-level error type for all multiwrap operations
//! - [`DispatchError`] - Errors raised while resolving or mutating a dispatch table
//! - [`HierarchyError`] - Errors raised while editing a key hierarchy

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all multiwrap operations.
#[derive(Error, Debug)]
pub enum MultiwrapError {
    /// An error occurred during dispatch.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// An error occurred while editing a hierarchy.
    #[error("hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur while resolving handlers or mutating tables.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A required collaborator was missing, or was supplied twice.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The wrapped engine was used before it was wired in.
    #[error("dispatcher `{name}` used before its engine was wired")]
    UninitializedState {
        /// Name of the dispatcher.
        name: String,
    },

    /// No method matched the dispatch key and no default method exists.
    #[error("no method in multimethod `{name}` for dispatch value: {key}")]
    NoMethod {
        /// Name of the multimethod.
        name: String,
        /// Debug rendering of the dispatch key.
        key: String,
    },

    /// Two methods match and neither dominates the other.
    #[error(
        "multiple methods in multimethod `{name}` match dispatch value: {key} -> {first} and {second}, and neither is preferred"
    )]
    Ambiguous {
        /// Name of the multimethod.
        name: String,
        /// Debug rendering of the dispatch key.
        key: String,
        /// First matching registered key.
        first: String,
        /// Second matching registered key.
        second: String,
    },

    /// The requested preference contradicts an existing one.
    #[error("preference conflict in multimethod `{name}`: {preferred} is already preferred to {other}")]
    PreferenceConflict {
        /// Name of the multimethod.
        name: String,
        /// Key that already wins.
        preferred: String,
        /// Key that already loses.
        other: String,
    },

    /// A fault raised by a foreign engine, passed through unchanged.
    #[error(transparent)]
    Engine(BoxError),

    /// A fault raised by a transform, passed through unchanged.
    #[error(transparent)]
    Transform(BoxError),
}

impl DispatchError {
    /// Shorthand for [`DispatchError::UninitializedState`].
    pub fn uninitialized(name: impl Into<String>) -> Self {
        DispatchError::UninitializedState { name: name.into() }
    }
}

/// Errors that can occur while editing a hierarchy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    /// A key cannot derive from itself.
    #[error("cannot derive {0} from itself")]
    SelfDerivation(String),

    /// The parent is already an indirect ancestor of the child.
    #[error("{child} already has {parent} as an ancestor")]
    AlreadyAncestor {
        /// Requested child.
        child: String,
        /// Requested parent.
        parent: String,
    },

    /// The derivation would create a cycle.
    #[error("cyclic derivation: {parent} already derives from {child}")]
    Cyclic {
        /// Requested child.
        child: String,
        /// Requested parent.
        parent: String,
    },
}

// Convenience conversions
impl From<BoxError> for MultiwrapError {
    fn from(err: BoxError) -> Self {
        MultiwrapError::Custom(err)
    }
}
