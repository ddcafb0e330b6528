//! # multiwrap - Instrumenting Multi-Dispatch Registry
//!
//! `multiwrap` wraps a dispatch engine so that every handler it resolves is
//! passed through a transform before the caller sees it. Key resolution,
//! the method table and preference rules stay with the engine; the wrapper
//! adds exactly one interception point.
//!
//! ## Quick Start
//!
//! ```rust
//! use multiwrap::prelude::*;
//! use multiwrap::{InstrumentingDispatcher, LoggingTransform, TableEngine};
//!
//! let dispatcher = InstrumentingDispatcher::create(
//!     "greet",
//!     TableEngine::new("greet"),
//!     LoggingTransform::named("greet"),
//! );
//! dispatcher
//!     .register(Keyword::new("animal/dog"), Method::new(|_: ()| "woof"))
//!     .unwrap();
//!
//! let bark = dispatcher.resolve(&Keyword::new("animal/dog")).unwrap().unwrap();
//! assert_eq!(bark.call(()), "woof");
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit log lines from [`LoggingTransform`], [`TracingObserver`]
//!   and the reference engine through the `tracing` crate.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use multiwrap_core::{
    // Errors
    BoxError,
    // Engine
    DispatchEngine,
    DispatchError,
    // Keys
    DispatchKey,
    HierarchyError,
    Identity,
    Keyword,
    // Handlers
    Method,
    MethodTable,
    MultiwrapError,
    // Observers
    NoopObserver,
    PreferTable,
    ResolveObserver,
    // Transforms
    Transform,
    TryTransform,
};

// Engine
pub use multiwrap_std::engine::{Hierarchy, SharedHierarchy, TableEngine, TableEngineBuilder};

// Instrumentation
pub use multiwrap_std::instrument::{InstrumentingDispatcher, InstrumentingDispatcherBuilder};

// Invocation
pub use multiwrap_std::{async_method::AsyncMethod, multimethod::MultiMethod};

// Hooks
pub use multiwrap_std::hooks::{LoggingTransform, TracingObserver};

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use multiwrap_std::testing::*;
}

/// Prelude module - common imports for multiwrap.
///
/// # Usage
///
/// ```rust,ignore
/// use multiwrap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AsyncMethod, BoxError, DispatchEngine, DispatchError, DispatchKey, Keyword, Method,
        MultiMethod, ResolveObserver, Transform,
    };
}
