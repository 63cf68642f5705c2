//! Launchers and the completion sinks they report through.
//!
//! A launcher is started once by the barrier and handed a [`Completion`]. It may
//! move that sink to any thread and complete it whenever its work finishes.
//! Because [`Completion::complete`] consumes the sink, a launcher cannot report
//! twice.

use crate::barrier::Round;
use std::fmt;
use std::sync::Arc;

/// The one-shot sink through which a launcher delivers its result.
///
/// Dropping a sink without completing it is the same as a launcher that never
/// finishes: the round waits for it until its deadline.
#[must_use = "a launcher must complete its sink or the round times out"]
pub struct Completion<T> {
    round: Option<Arc<Round<T>>>,
}

impl<T> Completion<T> {
    pub(crate) fn new(round: Arc<Round<T>>) -> Self {
        Self { round: Some(round) }
    }

    /// Delivers the result of this launcher's operation.
    pub fn complete(mut self, value: T) {
        if let Some(round) = self.round.take() {
            round.deliver(value);
        }
    }

    /// Whether the round this sink belongs to has already given up waiting.
    ///
    /// Launchers that can abort their own work may poll this; the barrier itself
    /// never cancels anything.
    pub fn is_abandoned(&self) -> bool {
        self.round.as_ref().map_or(true, |round| round.is_abandoned())
    }

    /// Turns the sink into a plain callback for APIs that expect `FnOnce(T)`.
    pub fn into_callback(self) -> impl FnOnce(T) {
        move |value| self.complete(value)
    }
}

impl<T> Drop for Completion<T> {
    fn drop(&mut self) {
        if let Some(round) = self.round.take() {
            if !round.is_abandoned() {
                tracing::debug!("completion sink dropped without a value");
            }
        }
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("pending", &self.round.is_some())
            .field("abandoned", &self.is_abandoned())
            .finish()
    }
}

/// A unit of asynchronous work that reports exactly one result.
pub trait Launcher<T> {
    /// Starts the operation. Must return promptly; the result is reported later
    /// through `completion`.
    fn launch(self, completion: Completion<T>);
}

impl<T, F> Launcher<T> for F
where
    F: FnOnce(Completion<T>),
{
    #[inline]
    fn launch(self, completion: Completion<T>) {
        self(completion);
    }
}

/// A type-erased launcher, for mixing differently-typed closures in one round.
pub type BoxedLauncher<'a, T> = Box<dyn FnOnce(Completion<T>) + 'a>;

/// Boxes a launcher closure.
pub fn boxed<'a, T, F>(launcher: F) -> BoxedLauncher<'a, T>
where
    F: FnOnce(Completion<T>) + 'a,
{
    Box::new(launcher)
}
