//! Burst-level error types

use thiserror::Error;

/// Errors surfaced to the caller of a burst
///
/// Per-event transport failures never appear here; they are folded into the
/// run result as failed outcomes.
#[derive(Debug, Error)]
pub enum BurstError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dispatcher is already running a burst")]
    AlreadyRunning,
}

impl BurstError {
    /// Shorthand for building a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        BurstError::Configuration(message.into())
    }

    /// Check if this is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, BurstError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display() {
        let err = BurstError::configuration("tag pool is empty");
        assert_eq!(err.to_string(), "Configuration error: tag pool is empty");
        assert!(err.is_configuration());
    }

    #[test]
    fn test_already_running_is_not_configuration() {
        assert!(!BurstError::AlreadyRunning.is_configuration());
    }
}
