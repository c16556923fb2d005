//! Gate strategies

use std::fmt;
use std::time::Duration;

/// Default pause inserted between batches
pub const DEFAULT_BATCH_PAUSE: Duration = Duration::from_millis(50);

/// How the concurrency bound is enforced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateStrategy {
    /// Fixed set of workers each pulling the next task until exhausted
    #[default]
    SharedQueue,

    /// Consecutive chunks of `concurrency` tasks; each chunk fully settles
    /// before the pause and the next chunk
    Batch { pause: Duration },
}

impl GateStrategy {
    /// Batch strategy with the default inter-batch pause
    pub fn batch() -> Self {
        GateStrategy::Batch {
            pause: DEFAULT_BATCH_PAUSE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GateStrategy::SharedQueue => "shared-queue",
            GateStrategy::Batch { .. } => "batch",
        }
    }
}

impl fmt::Display for GateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateStrategy::SharedQueue => f.write_str(self.name()),
            GateStrategy::Batch { pause } => write!(f, "{} (pause {:?})", self.name(), pause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_shared_queue() {
        assert_eq!(GateStrategy::default(), GateStrategy::SharedQueue);
    }

    #[test]
    fn test_batch_uses_default_pause() {
        assert_eq!(
            GateStrategy::batch(),
            GateStrategy::Batch {
                pause: DEFAULT_BATCH_PAUSE
            }
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(GateStrategy::SharedQueue.to_string(), "shared-queue");
        let batch = GateStrategy::Batch {
            pause: Duration::from_millis(5),
        };
        assert_eq!(batch.to_string(), "batch (pause 5ms)");
    }
}
