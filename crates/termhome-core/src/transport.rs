//! Client side of `/api/command`.

use crate::error::TermError;
use crate::protocol::{CommandReply, CommandRequest, COMMAND_PATH};

/// Sends one submitted line and returns the server's reply. One call per
/// submission; no retry and no timeout.
#[async_trait::async_trait]
pub trait CommandTransport: Send + Sync {
    async fn send(&self, command: &str) -> Result<CommandReply, TermError>;
}

/// reqwest-backed transport talking to a running gateway.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// `base_url` is the gateway origin, e.g. `http://127.0.0.1:8000`.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), COMMAND_PATH);
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl CommandTransport for HttpTransport {
    async fn send(&self, command: &str) -> Result<CommandReply, TermError> {
        tracing::debug!(endpoint = %self.endpoint, "sending command");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&CommandRequest::new(command))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        serde_json::from_str::<CommandReply>(&body).map_err(|e| {
            tracing::warn!(%status, "undecodable reply from gateway");
            TermError::Decode(format!("HTTP {}: {}", status, e))
        })
    }
}
