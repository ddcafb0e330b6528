//! # Multimethods
//!
//! A [`MultiMethod`] pairs a dispatch function with an engine. Calling it
//! computes a key from the arguments, resolves the handler through the
//! engine, and invokes the handler with the original arguments.
//!
//! The engine can be a plain [`TableEngine`](crate::engine::TableEngine) or an
//! [`InstrumentingDispatcher`](crate::instrument::InstrumentingDispatcher);
//! the multimethod only sees the [`DispatchEngine`] trait, so instrumentation
//! is invisible to it.
//!
//! # Example
//!
//! ```rust
//! use multiwrap_core::{Keyword, Method};
//! use multiwrap_std::{engine::TableEngine, multimethod::MultiMethod};
//!
//! struct Shape {
//!     kind: Keyword,
//!     size: f64,
//! }
//!
//! let area = MultiMethod::new("area", |s: &Shape| s.kind.clone(), TableEngine::new("area"));
//! area.define(Keyword::new("shape/square"), Method::new(|s: Shape| s.size * s.size))
//!     .unwrap();
//!
//! let square = Shape { kind: Keyword::new("shape/square"), size: 3.0 };
//! assert_eq!(area.invoke(square).unwrap(), 9.0);
//! ```

use crate::async_method::AsyncMethod;
use multiwrap_core::{DispatchEngine, DispatchError, DispatchKey, Method};
use std::{marker::PhantomData, sync::Arc};

/// A named function whose implementation is chosen per call by dispatch key.
pub struct MultiMethod<A, K, H, E> {
    name: String,
    dispatch: Arc<dyn Fn(&A) -> K + Send + Sync>,
    engine: E,
    _handler: PhantomData<fn() -> H>,
}

impl<A, K, H, E> MultiMethod<A, K, H, E>
where
    K: DispatchKey,
    E: DispatchEngine<K, H>,
{
    /// Create a multimethod over `engine` using `dispatch` to compute keys.
    pub fn new<F>(name: impl Into<String>, dispatch: F, engine: E) -> Self
    where
        F: Fn(&A) -> K + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            dispatch: Arc::new(dispatch),
            engine,
            _handler: PhantomData,
        }
    }

    /// The multimethod name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The engine handlers are resolved through.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Compute the dispatch key for `args`.
    pub fn dispatch_key(&self, args: &A) -> K {
        (self.dispatch)(args)
    }

    /// Register `handler` at `key`.
    pub fn define(&self, key: K, handler: H) -> Result<&Self, DispatchError> {
        self.engine.register(key, handler)?;
        Ok(self)
    }

    /// Remove the handler at `key`.
    pub fn remove(&self, key: &K) -> Result<&Self, DispatchError> {
        self.engine.unregister(key)?;
        Ok(self)
    }

    /// Prefer `preferred` over `other` when both match.
    pub fn prefer(&self, preferred: K, other: K) -> Result<&Self, DispatchError> {
        self.engine.prefer(preferred, other)?;
        Ok(self)
    }

    /// Resolve the handler that would serve `args`.
    pub fn handler_for(&self, args: &A) -> Result<H, DispatchError> {
        let key = self.dispatch_key(args);
        self.engine
            .resolve(&key)?
            .ok_or_else(|| DispatchError::NoMethod {
                name: self.name.clone(),
                key: format!("{key:?}"),
            })
    }
}

impl<A, K, R, E> MultiMethod<A, K, Method<A, R>, E>
where
    K: DispatchKey,
    E: DispatchEngine<K, Method<A, R>>,
{
    /// Dispatch on `args` and call the selected handler with them.
    pub fn invoke(&self, args: A) -> Result<R, DispatchError> {
        let handler = self.handler_for(&args)?;
        Ok(handler.call(args))
    }
}

impl<A, K, R, E> MultiMethod<A, K, AsyncMethod<A, R>, E>
where
    K: DispatchKey,
    E: DispatchEngine<K, AsyncMethod<A, R>>,
{
    /// Dispatch on `args` and await the selected handler.
    pub async fn invoke_async(&self, args: A) -> Result<R, DispatchError> {
        let handler = self.handler_for(&args)?;
        Ok(handler.call(args).await)
    }
}
