use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::domain::CalculationResult;

/// Outbound hook for computed results (e.g. a Make.com scenario).
/// Implementations must not block the caller on network I/O.
pub trait ResultNotifier: Send + Sync {
    fn publish(&self, result: &CalculationResult) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("failed to serialize notification payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Fire-and-forget JSON POST to a configured URL.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
    client: Arc<reqwest::Client>,
}

impl WebhookNotifier {
    pub fn try_new(url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| NotifyError::Transport(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            url: url.into(),
            client: Arc::new(client),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ResultNotifier for WebhookNotifier {
    fn publish(&self, result: &CalculationResult) -> Result<(), NotifyError> {
        let body = serde_json::to_vec(result)?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|err| NotifyError::Transport(err.to_string()))?;

        let request = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        let url = self.url.clone();

        runtime.spawn(async move {
            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(%url, "posted results to webhook");
                }
                Ok(response) => {
                    warn!(%url, status = %response.status(), "webhook returned non-success status");
                }
                Err(err) => {
                    warn!(%url, error = %err, "failed to post results to webhook");
                }
            }
        });

        Ok(())
    }
}
