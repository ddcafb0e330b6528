//! Builder for [`InstrumentingDispatcher`].

use super::dispatcher::InstrumentingDispatcher;
use multiwrap_core::{DispatchError, NoopObserver};

/// Builder for constructing an [`InstrumentingDispatcher`].
///
/// Unlike [`InstrumentingDispatcher::create`], the builder can be left
/// incomplete; [`build`](Self::build) then fails with
/// [`DispatchError::InvalidArgument`].
pub struct InstrumentingDispatcherBuilder<E, T, O = NoopObserver> {
    name: String,
    inner: Option<E>,
    wrapper: Option<T>,
    observer: O,
}

impl<E, T> InstrumentingDispatcherBuilder<E, T> {
    /// Create a new builder for a dispatcher called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: None,
            wrapper: None,
            observer: NoopObserver,
        }
    }
}

impl<E, T, O> InstrumentingDispatcherBuilder<E, T, O> {
    /// Set the engine to wrap.
    pub fn engine(mut self, inner: E) -> Self {
        self.inner = Some(inner);
        self
    }

    /// Set the handler transform.
    pub fn transform(mut self, wrapper: T) -> Self {
        self.wrapper = Some(wrapper);
        self
    }

    /// Set the resolution observer.
    pub fn observer<O2>(self, observer: O2) -> InstrumentingDispatcherBuilder<E, T, O2> {
        InstrumentingDispatcherBuilder {
            name: self.name,
            inner: self.inner,
            wrapper: self.wrapper,
            observer,
        }
    }

    /// Build the dispatcher.
    pub fn build(self) -> Result<InstrumentingDispatcher<E, T, O>, DispatchError> {
        let inner = self.inner.ok_or_else(|| {
            DispatchError::InvalidArgument(format!("dispatcher `{}` needs an engine", self.name))
        })?;
        let wrapper = self.wrapper.ok_or_else(|| {
            DispatchError::InvalidArgument(format!("dispatcher `{}` needs a transform", self.name))
        })?;
        Ok(InstrumentingDispatcher::from_parts(
            self.name,
            inner,
            wrapper,
            self.observer,
        ))
    }
}
