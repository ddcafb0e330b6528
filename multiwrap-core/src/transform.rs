//! # Interception Layer (Transform)
//!
//! A transform receives a freshly resolved handler and returns the handler the
//! caller will actually invoke. This is the only place where cross-cutting
//! behavior (logging, access checks, retries, metrics) is attached; dispatch
//! itself never sees it.
//!
//! Transforms run once per resolution and are never cached, so they must be
//! safe to call concurrently and must not mutate the registry.

use crate::error::BoxError;

/// Maps a resolved handler to the handler handed to the caller.
///
/// Closures `Fn(H) -> H` implement this trait directly. Use [`TryTransform`]
/// for closures that can fail.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot transform handlers of type `{H}`",
    label = "missing `Transform<{H}>` implementation",
    note = "Use a closure `Fn({H}) -> {H}` or wrap a fallible one in `TryTransform`."
)]
pub trait Transform<H>: Send + Sync {
    /// Transform a resolved handler.
    fn apply(&self, handler: H) -> Result<H, BoxError>;
}

impl<H, F> Transform<H> for F
where
    F: Fn(H) -> H + Send + Sync,
{
    fn apply(&self, handler: H) -> Result<H, BoxError> {
        Ok((self)(handler))
    }
}

/// Adapter for closures returning `Result<H, BoxError>`.
pub struct TryTransform<F>(pub F);

impl<H, F> Transform<H> for TryTransform<F>
where
    F: Fn(H) -> Result<H, BoxError> + Send + Sync,
{
    fn apply(&self, handler: H) -> Result<H, BoxError> {
        (self.0)(handler)
    }
}

/// Returns every handler unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<H> Transform<H> for Identity {
    fn apply(&self, handler: H) -> Result<H, BoxError> {
        Ok(handler)
    }
}
