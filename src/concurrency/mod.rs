//! Synchronization building blocks for a fan-in round.
//!
//! Both types assume one consumer: the thread that started the round.
//! Completion sinks on any number of other threads feed them.

pub mod gate;
pub mod queue;

pub use gate::WaitGate;
pub use queue::{CompletionQueue, Pop};
