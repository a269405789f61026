//! HTTP implementation of the change feed contract.

use crate::error::FeedError;
use crate::feed::ChangeFeed;
use netgrid_engine::{ChangeSet, Device, Watermark};
use std::time::Duration;

/// A [`ChangeFeed`] backed by the NetGrid server's HTTP endpoints:
///
/// - `GET {base}/collection`
/// - `GET {base}/collection/changes/since/{timestamp}`
///
/// Every request carries a bounded timeout; a timed-out fetch surfaces as
/// a [`FeedError::Transport`] and is handled like any other poll failure.
#[derive(Debug, Clone)]
pub struct HttpChangeFeed {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChangeFeed {
    /// Build a feed against `base_url` (scheme + authority, no trailing
    /// slash required) with the given per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Build a feed on top of an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, FeedError> {
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

impl ChangeFeed for HttpChangeFeed {
    async fn fetch_all(&self) -> Result<Vec<Device>, FeedError> {
        self.get_json(format!("{}/collection", self.base_url)).await
    }

    async fn fetch_changes(&self, since: Watermark) -> Result<ChangeSet, FeedError> {
        // The RFC 3339 Z form contains only path-safe characters, so the
        // cursor can be embedded without further escaping.
        self.get_json(format!(
            "{}/collection/changes/since/{}",
            self.base_url, since
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slashes() {
        let feed = HttpChangeFeed::with_client(reqwest::Client::new(), "http://localhost:3000//");
        assert_eq!(feed.base_url(), "http://localhost:3000");
    }
}
