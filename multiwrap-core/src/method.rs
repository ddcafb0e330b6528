//! # Handler Values
//!
//! A [`Method`] is the callable stored in a method table. It is a cheap,
//! cloneable handle around a shared closure, so the same stored handler can be
//! handed out and re-wrapped on every lookup.

use std::{fmt, sync::Arc};

/// A synchronous handler taking arguments `A` and producing `R`.
///
/// # Example
///
/// ```rust
/// use multiwrap_core::Method;
///
/// let greet = Method::new(|name: &'static str| format!("hello {name}"));
/// assert_eq!(greet.call("dog"), "hello dog");
/// ```
pub struct Method<A, R> {
    f: Arc<dyn Fn(A) -> R + Send + Sync>,
}

impl<A, R> Method<A, R> {
    /// Wrap a closure as a method.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Invoke the method.
    pub fn call(&self, args: A) -> R {
        (self.f)(args)
    }

    /// Returns `true` if both handles point to the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<A, R> Clone for Method<A, R> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<A, R> fmt::Debug for Method<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("ptr", &Arc::as_ptr(&self.f).cast::<()>())
            .finish()
    }
}
