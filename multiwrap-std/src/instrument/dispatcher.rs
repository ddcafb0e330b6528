//! The instrumenting dispatcher.

use super::builder::InstrumentingDispatcherBuilder;
use multiwrap_core::{
    DispatchEngine, DispatchError, DispatchKey, MethodTable, NoopObserver, PreferTable,
    ResolveObserver, Transform,
};
use std::fmt;
use std::sync::OnceLock;

struct Wiring<E, T> {
    inner: E,
    wrapper: T,
}

/// A dispatch engine decorator that transforms every resolved handler.
///
/// Resolution, registration, preferences and reset are delegated to the
/// wrapped engine unchanged. The only difference a caller can observe is that
/// [`resolve`](DispatchEngine::resolve) hands back `wrapper(handler)` instead
/// of `handler`. The wrapper runs on every successful lookup; nothing is
/// cached, and table snapshots expose the untransformed handlers.
///
/// # Lifecycle
///
/// The engine and the wrapper are set once and never replaced. Use
/// [`create`](Self::create) or [`builder`](Self::builder) when both are
/// available up front. Frameworks that need to allocate the dispatcher first
/// can use [`unwired`](Self::unwired) followed by [`wire`](Self::wire); until
/// then every operation fails with [`DispatchError::UninitializedState`]
/// except [`method_table`](DispatchEngine::method_table), which answers with
/// an empty table.
///
/// # Example
///
/// ```rust
/// use multiwrap_core::{DispatchEngine, Keyword, Method};
/// use multiwrap_std::{engine::TableEngine, instrument::InstrumentingDispatcher};
///
/// let engine = TableEngine::new("sound");
/// engine
///     .register(Keyword::new("animal/dog"), Method::new(|_: ()| "woof"))
///     .unwrap();
///
/// let loud = InstrumentingDispatcher::create("loud-sound", engine, |m: Method<(), &'static str>| {
///     Method::new(move |args| m.call(args))
/// });
///
/// let method = loud.resolve(&Keyword::new("animal/dog")).unwrap().unwrap();
/// assert_eq!(method.call(()), "woof");
/// ```
pub struct InstrumentingDispatcher<E, T, O = NoopObserver> {
    name: String,
    wiring: OnceLock<Wiring<E, T>>,
    observer: O,
}

impl<E, T, O> fmt::Debug for InstrumentingDispatcher<E, T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstrumentingDispatcher")
            .field("name", &self.name)
            .field("wired", &self.wiring.get().is_some())
            .finish()
    }
}

impl<E, T> InstrumentingDispatcher<E, T> {
    /// Wrap a fully built engine.
    pub fn create(name: impl Into<String>, inner: E, wrapper: T) -> Self {
        Self::from_parts(name.into(), inner, wrapper, NoopObserver)
    }

    /// Start configuring a dispatcher.
    pub fn builder(name: impl Into<String>) -> InstrumentingDispatcherBuilder<E, T> {
        InstrumentingDispatcherBuilder::new(name)
    }

    /// Allocate a dispatcher whose engine and wrapper are supplied later via
    /// [`wire`](Self::wire).
    pub fn unwired(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wiring: OnceLock::new(),
            observer: NoopObserver,
        }
    }
}

impl<E, T, O> InstrumentingDispatcher<E, T, O> {
    pub(crate) fn from_parts(name: String, inner: E, wrapper: T, observer: O) -> Self {
        Self {
            name,
            wiring: OnceLock::from(Wiring { inner, wrapper }),
            observer,
        }
    }

    /// Replace the resolution observer.
    pub fn with_observer<O2>(self, observer: O2) -> InstrumentingDispatcher<E, T, O2> {
        InstrumentingDispatcher {
            name: self.name,
            wiring: self.wiring,
            observer,
        }
    }

    /// Supply the engine and the wrapper of an unwired dispatcher.
    ///
    /// Fails with [`DispatchError::InvalidArgument`] if the dispatcher is
    /// already wired; the existing engine and wrapper are kept.
    pub fn wire(&self, inner: E, wrapper: T) -> Result<&Self, DispatchError> {
        self.wiring
            .set(Wiring { inner, wrapper })
            .map_err(|_| {
                DispatchError::InvalidArgument(format!(
                    "dispatcher `{}` is already wired",
                    self.name
                ))
            })?;
        Ok(self)
    }

    /// Returns `true` once the engine and wrapper are set.
    pub fn is_wired(&self) -> bool {
        self.wiring.get().is_some()
    }

    /// The wrapped engine.
    pub fn inner(&self) -> Result<&E, DispatchError> {
        self.wiring().map(|w| &w.inner)
    }

    /// The handler transform.
    pub fn wrapper(&self) -> Result<&T, DispatchError> {
        self.wiring().map(|w| &w.wrapper)
    }

    /// The resolution observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    fn wiring(&self) -> Result<&Wiring<E, T>, DispatchError> {
        self.wiring
            .get()
            .ok_or_else(|| DispatchError::uninitialized(&self.name))
    }
}

impl<K, H, E, T, O> DispatchEngine<K, H> for InstrumentingDispatcher<E, T, O>
where
    K: DispatchKey,
    E: DispatchEngine<K, H>,
    T: Transform<H>,
    O: ResolveObserver<K>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, key: &K) -> Result<Option<H>, DispatchError> {
        let wiring = self.wiring()?;
        let found = wiring.inner.resolve(key)?;
        self.observer.on_resolve(&self.name, key, found.is_some());
        found
            .map(|handler| {
                wiring
                    .wrapper
                    .apply(handler)
                    .map_err(DispatchError::Transform)
            })
            .transpose()
    }

    fn register(&self, key: K, handler: H) -> Result<&Self, DispatchError> {
        self.wiring()?.inner.register(key, handler)?;
        Ok(self)
    }

    fn unregister(&self, key: &K) -> Result<&Self, DispatchError> {
        self.wiring()?.inner.unregister(key)?;
        Ok(self)
    }

    fn prefer(&self, preferred: K, other: K) -> Result<&Self, DispatchError> {
        self.wiring()?.inner.prefer(preferred, other)?;
        Ok(self)
    }

    fn reset(&self) -> Result<&Self, DispatchError> {
        self.wiring()?.inner.reset()?;
        Ok(self)
    }

    // Uninstrumented handlers are visible here. An unwired dispatcher reports
    // an empty table so frameworks can probe it during two-phase setup.
    fn method_table(&self) -> MethodTable<K, H> {
        match self.wiring.get() {
            Some(wiring) => wiring.inner.method_table(),
            None => MethodTable::new(),
        }
    }

    // No unwired fallback here, unlike `method_table`.
    fn prefer_table(&self) -> Result<PreferTable<K>, DispatchError> {
        self.wiring()?.inner.prefer_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::TableEngine, testing::CountingTransform};
    use multiwrap_core::{BoxError, Identity, Keyword, Method, TryTransform};
    use std::sync::Arc;

    type Sound = Method<(), &'static str>;

    fn kw(s: &str) -> Keyword {
        Keyword::new(s)
    }

    fn shout(m: Sound) -> Sound {
        Method::new(move |args| match m.call(args) {
            "woof" => "WOOF",
            other => other,
        })
    }

    #[test]
    fn resolve_applies_wrapper() {
        let engine = TableEngine::new("sound");
        engine
            .register(kw("animal/dog"), Method::new(|_: ()| "woof"))
            .unwrap();
        let dispatcher = InstrumentingDispatcher::create("loud", engine, shout);

        let method = dispatcher.resolve(&kw("animal/dog")).unwrap().unwrap();
        assert_eq!(method.call(()), "WOOF");
    }

    #[test]
    fn missing_key_skips_wrapper() {
        let counter = CountingTransform::new();
        let dispatcher = InstrumentingDispatcher::create(
            "sound",
            TableEngine::<Keyword, Sound>::new("sound"),
            counter.clone(),
        );

        assert!(dispatcher.resolve(&kw("animal/cat")).unwrap().is_none());
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn wrapper_runs_once_per_resolve() {
        let counter = CountingTransform::new();
        let dispatcher = InstrumentingDispatcher::create(
            "sound",
            TableEngine::<Keyword, Sound>::new("sound"),
            counter.clone(),
        );
        dispatcher
            .register(kw("animal/dog"), Method::new(|_| "woof"))
            .unwrap();

        for _ in 0..3 {
            dispatcher.resolve(&kw("animal/dog")).unwrap();
        }
        assert_eq!(counter.count(), 3);
    }

    #[test]
    fn registration_stores_untransformed_handler() {
        let engine = Arc::new(TableEngine::<Keyword, Sound>::new("sound"));
        let dispatcher = InstrumentingDispatcher::create("loud", engine.clone(), shout);
        let original = Method::new(|_| "woof");
        dispatcher.register(kw("animal/dog"), original.clone()).unwrap();

        let stored = engine.method_table();
        assert!(stored[&kw("animal/dog")].ptr_eq(&original));
        assert!(dispatcher.method_table()[&kw("animal/dog")].ptr_eq(&original));
    }

    #[test]
    fn mutations_are_forwarded() {
        let engine = Arc::new(TableEngine::<Keyword, Sound>::new("sound"));
        let dispatcher = InstrumentingDispatcher::create("sound", engine.clone(), Identity);

        dispatcher
            .register(kw("animal/dog"), Method::new(|_| "woof"))
            .unwrap()
            .prefer(kw("animal/dog"), kw("animal/cat"))
            .unwrap();
        assert_eq!(engine.method_table().len(), 1);
        let prefers = engine.prefer_table().unwrap();
        assert!(prefers[&kw("animal/dog")].contains(&kw("animal/cat")));

        dispatcher.unregister(&kw("animal/dog")).unwrap();
        assert!(engine.method_table().is_empty());

        dispatcher.reset().unwrap();
        assert!(engine.prefer_table().unwrap().is_empty());
    }

    #[test]
    fn wrapper_errors_propagate_unchanged() {
        let deny = TryTransform(|_: Sound| -> Result<Sound, BoxError> {
            Err("access denied".into())
        });
        let dispatcher =
            InstrumentingDispatcher::create("guarded", TableEngine::new("sound"), deny);
        dispatcher
            .register(kw("animal/dog"), Method::new(|_| "woof"))
            .unwrap();

        let err = dispatcher.resolve(&kw("animal/dog")).unwrap_err();
        assert!(matches!(err, DispatchError::Transform(_)));
        assert_eq!(err.to_string(), "access denied");
    }

    #[test]
    fn unwired_dispatcher_tolerates_method_table_only() {
        let dispatcher: InstrumentingDispatcher<TableEngine<Keyword, Sound>, Identity> =
            InstrumentingDispatcher::unwired("pending");

        assert!(!dispatcher.is_wired());
        assert!(dispatcher.method_table().is_empty());
        assert!(matches!(
            dispatcher.prefer_table(),
            Err(DispatchError::UninitializedState { .. })
        ));
        assert!(matches!(
            dispatcher.resolve(&kw("animal/dog")),
            Err(DispatchError::UninitializedState { .. })
        ));
        assert!(matches!(
            dispatcher.register(kw("animal/dog"), Method::new(|_| "woof")),
            Err(DispatchError::UninitializedState { .. })
        ));
        assert!(dispatcher.inner().is_err());
    }

    #[test]
    fn wire_happens_once() {
        let dispatcher: InstrumentingDispatcher<TableEngine<Keyword, Sound>, Identity> =
            InstrumentingDispatcher::unwired("pending");
        let engine = TableEngine::new("first");
        engine
            .register(kw("animal/dog"), Method::new(|_| "woof"))
            .unwrap();

        dispatcher.wire(engine, Identity).unwrap();
        assert!(dispatcher.is_wired());
        assert_eq!(dispatcher.method_table().len(), 1);

        let err = dispatcher
            .wire(TableEngine::new("second"), Identity)
            .unwrap_err();
        assert!(matches!(err, DispatchError::InvalidArgument(_)));
        let inner = dispatcher.inner().unwrap();
        assert_eq!(DispatchEngine::<Keyword, Sound>::name(inner), "first");
    }
}
