//! # Dispatch Engine Layer
//!
//! A dispatch engine owns the method table and the preference table and
//! decides which handler serves a given dispatch key. Everything above this
//! layer (instrumenting dispatchers, multimethods) is written against the
//! [`DispatchEngine`] trait only, so an engine and a decorator over an engine
//! are interchangeable.
//!
//! # Roles
//!
//! - **Selection**: find the most specific handler for a key.
//! - **Mutation**: register, unregister, declare preferences, reset.
//! - **Inspection**: snapshot the method and preference tables.

use crate::{error::DispatchError, key::DispatchKey};
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

/// Mapping from dispatch key to the handler registered at that key.
pub type MethodTable<K, H> = HashMap<K, H>;

/// Mapping from a preferred key to the keys it beats in ambiguous matches.
pub type PreferTable<K> = HashMap<K, HashSet<K>>;

/// The dispatch engine interface.
///
/// Mutating operations take `&self` and return `&Self` so they can be
/// chained with `?`. Engines are expected to use interior mutability and to
/// be safe to share across threads.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot dispatch handlers of type `{H}` by keys of type `{K}`",
    label = "missing `DispatchEngine` implementation",
    note = "Implement `DispatchEngine<{K}, {H}>` or wrap an engine that does."
)]
pub trait DispatchEngine<K: DispatchKey, H>: Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Resolve the handler that serves `key`, if any.
    ///
    /// A missing handler is `Ok(None)`, not an error.
    fn resolve(&self, key: &K) -> Result<Option<H>, DispatchError>;

    /// Register `handler` at `key`, replacing any previous handler.
    fn register(&self, key: K, handler: H) -> Result<&Self, DispatchError>;

    /// Remove the handler registered at `key`.
    fn unregister(&self, key: &K) -> Result<&Self, DispatchError>;

    /// Declare that `preferred` wins over `other` when both match.
    fn prefer(&self, preferred: K, other: K) -> Result<&Self, DispatchError>;

    /// Clear the method table and the preference table.
    fn reset(&self) -> Result<&Self, DispatchError>;

    /// Snapshot of the method table.
    fn method_table(&self) -> MethodTable<K, H>;

    /// Snapshot of the preference table.
    fn prefer_table(&self) -> Result<PreferTable<K>, DispatchError>;
}

// Shared engines dispatch like the engine they point to.
impl<K, H, E> DispatchEngine<K, H> for Arc<E>
where
    K: DispatchKey,
    E: DispatchEngine<K, H>,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn resolve(&self, key: &K) -> Result<Option<H>, DispatchError> {
        (**self).resolve(key)
    }

    fn register(&self, key: K, handler: H) -> Result<&Self, DispatchError> {
        (**self).register(key, handler)?;
        Ok(self)
    }

    fn unregister(&self, key: &K) -> Result<&Self, DispatchError> {
        (**self).unregister(key)?;
        Ok(self)
    }

    fn prefer(&self, preferred: K, other: K) -> Result<&Self, DispatchError> {
        (**self).prefer(preferred, other)?;
        Ok(self)
    }

    fn reset(&self) -> Result<&Self, DispatchError> {
        (**self).reset()?;
        Ok(self)
    }

    fn method_table(&self) -> MethodTable<K, H> {
        (**self).method_table()
    }

    fn prefer_table(&self) -> Result<PreferTable<K>, DispatchError> {
        (**self).prefer_table()
    }
}
