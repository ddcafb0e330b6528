//! Dispatch keys.

use crate::error::DispatchError;
use std::{fmt, hash::Hash, str::FromStr, sync::Arc};

/// A marker trait for values used to select a handler.
///
/// Equality and hierarchy semantics belong to the engine; the key itself is
/// opaque. Any `Clone + Eq + Hash + Debug` value that is thread-safe is a key.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid DispatchKey",
    label = "must be `Clone + Eq + Hash + Debug + Send + Sync + 'static`",
    note = "Dispatch keys are compared and hashed by the engine and shared across threads."
)]
pub trait DispatchKey: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> DispatchKey for T where T: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// A namespaced symbolic key such as `:animal/dog`.
///
/// Cloning is O(1); the text is shared behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use multiwrap_core::Keyword;
///
/// let dog: Keyword = ":animal/dog".parse().unwrap();
/// assert_eq!(dog.namespace(), Some("animal"));
/// assert_eq!(dog.name(), "dog");
/// assert_eq!(dog.to_string(), ":animal/dog");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Keyword(Arc<str>);

impl Keyword {
    /// Create a keyword from `name` or `namespace/name`.
    ///
    /// # Panics
    ///
    /// Panics if the text is malformed. Keys built from runtime data should
    /// go through [`Keyword::namespaced`] or [`str::parse`] instead.
    pub fn new(text: &str) -> Self {
        match text.parse() {
            Ok(kw) => kw,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a keyword from separate namespace and name parts.
    ///
    /// Fails with [`DispatchError::InvalidArgument`] if either part is empty.
    pub fn namespaced(namespace: &str, name: &str) -> Result<Self, DispatchError> {
        format!("{namespace}/{name}").parse()
    }

    /// The namespace part, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.0.split_once('/').map(|(ns, _)| ns)
    }

    /// The name part.
    pub fn name(&self) -> &str {
        match self.0.split_once('/') {
            Some((_, name)) => name,
            None => &self.0,
        }
    }

    /// The full text without the leading colon.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Keyword {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.strip_prefix(':').unwrap_or(s);
        let (namespace, name) = match text.split_once('/') {
            Some((ns, name)) => (Some(ns), name),
            None => (None, text),
        };
        if name.is_empty() || namespace.is_some_and(str::is_empty) {
            return Err(DispatchError::InvalidArgument(format!(
                "malformed keyword: {s:?}"
            )));
        }
        Ok(Self(Arc::from(text)))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
