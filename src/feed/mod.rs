//! External property-feed client, used only as a photo source.
//!
//! A snapshot is fetched fresh per request and must degrade, never fail the
//! pipeline: the orchestrator absorbs every [`FeedFetchError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;

use crate::config::ServerConfig;

mod errors;
mod models;

pub use errors::FeedFetchError;
pub use models::{ExternalListing, MediaAsset};

/// Source of the per-request listing snapshot.
#[async_trait]
pub trait ListingFeed: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<Vec<ExternalListing>, FeedFetchError>;
}

/// OData responses wrap the listing array in a `value` property.
#[derive(Debug, Deserialize)]
struct FeedSnapshot {
    #[serde(default)]
    value: Vec<ExternalListing>,
}

/// RESO OData feed client with a bounded per-request timeout.
pub struct RealtyFeedClient {
    http: reqwest::Client,
    url: String,
    token: String,
    timeout: Duration,
}

impl RealtyFeedClient {
    pub fn new(http: reqwest::Client, config: &ServerConfig) -> Self {
        Self {
            http,
            url: config.feed_url.clone(),
            token: config.feed_token.clone(),
            timeout: Duration::from_secs(config.feed_timeout_secs),
        }
    }
}

#[async_trait]
impl ListingFeed for RealtyFeedClient {
    async fn fetch_snapshot(&self) -> Result<Vec<ExternalListing>, FeedFetchError> {
        let response = self
            .http
            .get(&self.url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FeedFetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedFetchError::Status(status.as_u16()));
        }

        let snapshot: FeedSnapshot = response
            .json()
            .await
            .map_err(|e| FeedFetchError::Decode(e.to_string()))?;

        log::info!(
            "Fetched {} listings from the property feed",
            snapshot.value.len()
        );
        Ok(snapshot.value)
    }
}
