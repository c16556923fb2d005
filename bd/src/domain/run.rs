//! Run configuration and dispatcher lifecycle state

use std::fmt;

use crate::error::BurstError;
use crate::gate::GateStrategy;

/// Parameters of a single burst
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Number of events to submit
    pub total: usize,

    /// Upper bound on simultaneously in-flight submissions
    pub concurrency: usize,

    /// Candidate hashtags (normalized and filtered by the factory)
    pub tag_pool: Vec<String>,

    /// How the concurrency bound is enforced
    pub strategy: GateStrategy,
}

impl RunConfig {
    /// Create a run config using the shared-queue strategy
    pub fn new<S: Into<String>>(total: usize, concurrency: usize, tag_pool: impl IntoIterator<Item = S>) -> Self {
        Self {
            total,
            concurrency,
            tag_pool: tag_pool.into_iter().map(Into::into).collect(),
            strategy: GateStrategy::SharedQueue,
        }
    }

    pub fn with_strategy(mut self, strategy: GateStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Concurrency actually used by the run: `min(concurrency, total)`
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.min(self.total)
    }

    /// Reject configurations no run can start from
    ///
    /// The tag pool is checked separately by the factory, after blank entries
    /// have been filtered out.
    pub fn validate(&self) -> Result<(), BurstError> {
        if self.concurrency == 0 {
            return Err(BurstError::configuration("concurrency must be at least 1"));
        }
        if self.tag_pool.is_empty() {
            return Err(BurstError::configuration("tag pool must not be empty"));
        }
        Ok(())
    }
}

/// Lifecycle of a dispatcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchState {
    #[default]
    Idle,
    Running,
    Completed,
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DispatchState::Idle => "idle",
            DispatchState::Running => "running",
            DispatchState::Completed => "completed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_concurrency_clamped_to_total() {
        let config = RunConfig::new(3, 20, ["#AI"]);
        assert_eq!(config.effective_concurrency(), 3);

        let config = RunConfig::new(100, 20, ["#AI"]);
        assert_eq!(config.effective_concurrency(), 20);

        let config = RunConfig::new(0, 5, ["#AI"]);
        assert_eq!(config.effective_concurrency(), 0);
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = RunConfig::new(10, 0, ["#AI"]);
        let err = config.validate().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_pool_rejected() {
        let config = RunConfig::new(10, 2, Vec::<String>::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_concurrency_above_total_accepted() {
        let config = RunConfig::new(2, 10, ["#AI"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_strategy_is_shared_queue() {
        let config = RunConfig::new(1, 1, ["#AI"]);
        assert_eq!(config.strategy, GateStrategy::SharedQueue);
    }

    #[test]
    fn test_dispatch_state_display() {
        assert_eq!(DispatchState::default(), DispatchState::Idle);
        assert_eq!(DispatchState::Running.to_string(), "running");
    }
}
