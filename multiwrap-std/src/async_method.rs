//! Asynchronous handler values.

use futures::future::{BoxFuture, FutureExt};
use std::{fmt, future::Future, sync::Arc};

/// An asynchronous handler taking arguments `A` and resolving to `R`.
///
/// Like [`Method`](multiwrap_core::Method), cloning only bumps a reference
/// count, so a stored handler can be resolved and wrapped any number of times.
pub struct AsyncMethod<A, R> {
    f: Arc<dyn Fn(A) -> BoxFuture<'static, R> + Send + Sync>,
}

impl<A, R> AsyncMethod<A, R> {
    /// Wrap an async closure as a method.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
    {
        Self {
            f: Arc::new(move |args| f(args).boxed()),
        }
    }

    /// Invoke the method.
    pub fn call(&self, args: A) -> BoxFuture<'static, R> {
        (self.f)(args)
    }

    /// Returns `true` if both handles point to the same closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<A, R> Clone for AsyncMethod<A, R> {
    fn clone(&self) -> Self {
        Self { f: self.f.clone() }
    }
}

impl<A, R> fmt::Debug for AsyncMethod<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncMethod")
            .field("ptr", &Arc::as_ptr(&self.f).cast::<()>())
            .finish()
    }
}
