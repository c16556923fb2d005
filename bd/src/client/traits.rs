//! EventClient trait definition

use async_trait::async_trait;

use super::TransportError;
use crate::domain::EventPayload;

/// Submits a single event to the ingestion endpoint
///
/// Each call is independent. Any non-success response is reported as a
/// [`TransportError`]; callers are expected to treat every error the same
/// way regardless of status.
#[async_trait]
pub trait EventClient: Send + Sync {
    /// Submit one payload, returning the id the endpoint assigned to it
    async fn submit_event(&self, payload: &EventPayload) -> Result<String, TransportError>;
}
