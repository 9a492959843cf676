//! Headlines from the public RSS news feed.
//!
//! Only entry titles are used. `feed-rs` handles RSS and Atom alike, along
//! with CDATA sections and entity escapes.

use tracing::debug;

use crate::config::NewsConfig;
use crate::error::ContentError;

/// Unauthenticated news feed client.
pub struct NewsFeed {
    url: String,
    item_count: usize,
    http_client: reqwest::Client,
}

impl NewsFeed {
    pub fn new(config: &NewsConfig, http_client: reqwest::Client) -> Self {
        Self {
            url: config.feed_url.clone(),
            item_count: config.item_count,
            http_client,
        }
    }

    /// Titles of the newest entries, newest first.
    pub async fn headlines(&self) -> Result<Vec<String>, ContentError> {
        let response = self
            .http_client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| ContentError::Feed(e.to_string()))?
            .error_for_status()
            .map_err(|e| ContentError::Feed(e.to_string()))?;

        let xml = response
            .bytes()
            .await
            .map_err(|e| ContentError::Feed(format!("response read failed: {e}")))?;

        debug!(bytes = xml.len(), "News feed received");

        parse_headlines(&xml, self.item_count)
    }
}

/// Extract up to `limit` entry titles from an RSS or Atom document.
pub fn parse_headlines(xml: &[u8], limit: usize) -> Result<Vec<String>, ContentError> {
    let feed = feed_rs::parser::parse(xml)
        .map_err(|e| ContentError::Feed(format!("invalid feed: {e}")))?;

    let headlines = feed
        .entries
        .into_iter()
        .filter_map(|entry| entry.title)
        .map(|title| title.content.trim().to_string())
        .filter(|title| !title.is_empty())
        .take(limit)
        .collect();

    Ok(headlines)
}
