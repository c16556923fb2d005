//! Submission outcomes and the aggregated run result

use serde::{Deserialize, Serialize};

/// Final result of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success { event_id: String },
    Failure { reason: String },
}

impl SubmissionOutcome {
    pub fn success(event_id: impl Into<String>) -> Self {
        SubmissionOutcome::Success {
            event_id: event_id.into(),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        SubmissionOutcome::Failure { reason: reason.into() }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }
}

/// Aggregated outcome of a burst
///
/// `finished` counts every settled task; `event_ids` only holds the ids of
/// successful submissions, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub finished: usize,
    pub event_ids: Vec<String>,
}

impl RunResult {
    /// Number of settled tasks that failed
    pub fn failed(&self) -> usize {
        self.finished.saturating_sub(self.event_ids.len())
    }

    /// Number of settled tasks that succeeded
    pub fn succeeded(&self) -> usize {
        self.event_ids.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    /// Id of the most recently completed successful submission
    pub fn last_event_id(&self) -> Option<&str> {
        self.event_ids.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = RunResult::default();
        assert_eq!(result.finished, 0);
        assert_eq!(result.failed(), 0);
        assert!(result.all_succeeded());
        assert_eq!(result.last_event_id(), None);
    }

    #[test]
    fn test_partial_failure_counts() {
        let result = RunResult {
            finished: 5,
            event_ids: vec!["e1".to_string(), "e3".to_string(), "e2".to_string()],
        };
        assert_eq!(result.succeeded(), 3);
        assert_eq!(result.failed(), 2);
        assert!(!result.all_succeeded());
        assert_eq!(result.last_event_id(), Some("e2"));
    }

    #[test]
    fn test_outcome_constructors() {
        assert!(SubmissionOutcome::success("e1").is_success());
        assert!(!SubmissionOutcome::failure("HTTP 500").is_success());
    }
}
