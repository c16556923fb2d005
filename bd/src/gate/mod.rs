//! Concurrency gate for burst dispatch
//!
//! Bounds the number of simultaneously outstanding submissions. Two
//! interchangeable strategies satisfy the same contract: a fixed pool of
//! workers pulling from a shared counter, or consecutive batches separated
//! by a short pause.

mod core;
mod strategy;

pub use self::core::{ConcurrencyGate, GateStats};
pub use strategy::{DEFAULT_BATCH_PAUSE, GateStrategy};
