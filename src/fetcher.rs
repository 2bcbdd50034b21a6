//! Retrieval of raw feed text.
//!
//! Each fetch stands alone: its outcome is returned as a value, never
//! propagated, so a failing feed cannot disturb its siblings.

use reqwest::Client;

use crate::error::{DashboardError, Result};
use crate::models::FeedSource;

/// Result of fetching one feed.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The source has no URL. No request was made.
    Unconfigured,
    /// Body text of a successful response.
    Fetched(String),
    /// Transport error or non-success status.
    Failed(DashboardError),
}

/// Fetches feed text over HTTP with a shared client.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch one source. Issues at most one request and never retries.
    pub async fn fetch(&self, source: &FeedSource) -> FetchOutcome {
        let Some(url) = source.url() else {
            tracing::info!(metric = %source.metric, "feed not configured; skipping");
            return FetchOutcome::Unconfigured;
        };

        tracing::debug!(metric = %source.metric, url, "fetching feed");
        match self.fetch_text(url).await {
            Ok(text) => {
                tracing::debug!(metric = %source.metric, bytes = text.len(), "feed fetched");
                FetchOutcome::Fetched(text)
            }
            Err(e) => FetchOutcome::Failed(e),
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DashboardError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp.text().await?)
    }
}
