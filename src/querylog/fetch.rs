use log::{debug, error};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use super::types::QueryLog;
use crate::config::AdGuardSettings;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{0} is not set")]
    Config(&'static str),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("AdGuard Home returned {0}")]
    Status(StatusCode),

    #[error("invalid query log body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Reads the query log of an AdGuard Home instance.
pub struct QueryLogFetcher {
    client: Client,
    settings: AdGuardSettings,
}

impl QueryLogFetcher {
    pub fn new(client: Client, settings: AdGuardSettings) -> Self {
        Self { client, settings }
    }

    /// Fetch the newest `limit` entries, logging and swallowing any failure.
    pub async fn fetch(&self, limit: usize) -> Option<QueryLog> {
        match self.try_fetch(limit).await {
            Ok(log) => {
                debug!(
                    "Fetched {} query log entries",
                    log.data.as_ref().map_or(0, Vec::len)
                );
                Some(log)
            }
            Err(e) => {
                error!("Error fetching query log: {e}");
                None
            }
        }
    }

    pub async fn try_fetch(&self, limit: usize) -> Result<QueryLog, FetchError> {
        let url = self
            .settings
            .url
            .as_deref()
            .ok_or(FetchError::Config("ADGUARD_URL"))?;

        let mut request = self
            .client
            .get(format!("{url}?limit={limit}"))
            .header(ACCEPT, "application/json");
        if let Some(username) = &self.settings.username {
            request = request.basic_auth(username, self.settings.password.as_deref());
        }

        let response = request.send().await.map_err(FetchError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.json::<QueryLog>().await.map_err(FetchError::Decode)
    }
}
