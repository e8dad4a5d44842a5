use reqwest::{Client, StatusCode};
use serde::Serialize;
use thiserror::Error;

use crate::config::HubSettings;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("{0} is not set")]
    Config(&'static str),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Home Assistant returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Writes entity states through the Home Assistant REST API.
pub struct HubClient {
    client: Client,
    settings: HubSettings,
}

impl HubClient {
    pub fn new(client: Client, settings: HubSettings) -> Self {
        Self { client, settings }
    }

    pub fn entity_url(&self, entity: &str) -> Result<String, PublishError> {
        let base = self
            .settings
            .url
            .as_deref()
            .ok_or(PublishError::Config("HOME_ASSISTANT_URL"))?;
        Ok(format!("{}/{}", base.trim_end_matches('/'), entity))
    }

    pub async fn post_state<T: Serialize + ?Sized>(
        &self,
        entity: &str,
        payload: &T,
    ) -> Result<(), PublishError> {
        let url = self.entity_url(entity)?;

        let mut request = self.client.post(&url).json(payload);
        if let Some(token) = &self.settings.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(PublishError::Transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response body".to_string());
        Err(PublishError::Status { status, body })
    }
}
