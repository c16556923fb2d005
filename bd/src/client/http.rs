//! HTTP EventClient implementation
//!
//! Talks to the ingestion REST API: `POST {base}/events` for submissions and
//! `GET {base}/health` for liveness.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use super::{EventClient, TransportError};
use crate::config::ClientConfig;
use crate::domain::EventPayload;

/// Response body fields checked, in order, for the assigned event id
const EVENT_ID_FIELDS: &[&str] = &["event_id", "id", "ts"];

/// Error body fields checked, in order, for a human-readable message
const ERROR_MESSAGE_FIELDS: &[&str] = &["error", "detail", "message"];

/// Upper bound on a single retry backoff
pub const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// REST client for the ingestion API
pub struct HttpEventClient {
    base_url: String,
    http: Client,
    max_retries: u32,
    initial_backoff: Duration,
}

impl HttpEventClient {
    /// Create a new client from configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        debug!(?config, "HttpEventClient::from_config: called");
        let timeout = Duration::from_millis(config.timeout_ms);
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn events_url(&self) -> String {
        format!("{}/events", self.base_url)
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    /// Delay before retry `attempt` (1-based): doubles each time, capped at `MAX_BACKOFF`
    fn backoff_for(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt.saturating_sub(1))
            .and_then(|factor| self.initial_backoff.checked_mul(factor))
            .map_or(MAX_BACKOFF, |backoff| backoff.min(MAX_BACKOFF))
    }

    /// Query the endpoint's health report
    pub async fn health(&self) -> Result<serde_json::Value, TransportError> {
        debug!(url = %self.health_url(), "health: called");
        let response = self.http.get(self.health_url()).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if !(200..300).contains(&status) {
            debug!(status, "health: endpoint unhealthy");
            return Err(TransportError::Status {
                status,
                message: error_message(status, &text),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn post_once(&self, body: &serde_json::Value) -> Result<String, TransportError> {
        let response = self.http.post(self.events_url()).json(body).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        if !(200..300).contains(&status) {
            debug!(status, "post_once: API error");
            return Err(TransportError::Status {
                status,
                message: error_message(status, &text),
            });
        }

        let value: serde_json::Value = serde_json::from_str(&text)?;
        extract_event_id(&value)
            .ok_or_else(|| TransportError::InvalidResponse(format!("no event id in response: {}", text)))
    }
}

#[async_trait]
impl EventClient for HttpEventClient {
    async fn submit_event(&self, payload: &EventPayload) -> Result<String, TransportError> {
        debug!(event_type = %payload.event_type, user_id = %payload.user_id, "submit_event: called");
        let body = serde_json::to_value(payload)?;

        let mut attempt = 0;
        loop {
            if attempt > 0 {
                let backoff = self.backoff_for(attempt);
                warn!(attempt, ?backoff, "submit_event: retrying after transient error");
                tokio::time::sleep(backoff).await;
            }

            match self.post_once(&body).await {
                Ok(event_id) => {
                    debug!(%event_id, attempt, "submit_event: success");
                    return Ok(event_id);
                }
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    debug!(attempt, error = %e, "submit_event: retryable error");
                    attempt += 1;
                }
                Err(e) => {
                    debug!(attempt, error = %e, "submit_event: giving up");
                    return Err(e);
                }
            }
        }
    }
}

/// Pull the assigned event id out of a success body
///
/// Strings are used as-is and numbers are stringified.
pub(crate) fn extract_event_id(body: &serde_json::Value) -> Option<String> {
    EVENT_ID_FIELDS.iter().find_map(|field| match body.get(*field)? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Best-effort message for a non-success response
pub(crate) fn error_message(status: u16, body: &str) -> String {
    let fallback = format!("HTTP {}", status);
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback;
    };

    ERROR_MESSAGE_FIELDS
        .iter()
        .find_map(|field| match value.get(*field)? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        })
        .unwrap_or(fallback)
}
