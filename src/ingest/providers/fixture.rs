use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;

use crate::ingest::types::FeedSource;

/// In-memory feeds keyed by URL. Unknown URLs fail like an unreachable host.
#[derive(Debug, Clone, Default)]
pub struct FixtureFeedSource {
    feeds: HashMap<String, String>,
}

impl FixtureFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, url: &str, body: &str) -> Self {
        self.feeds.insert(url.to_string(), body.to_string());
        self
    }
}

#[async_trait]
impl FeedSource for FixtureFeedSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.feeds
            .get(url)
            .map(|s| s.as_bytes().to_vec())
            .ok_or_else(|| anyhow!("no fixture registered for {url}"))
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
