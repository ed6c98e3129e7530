// src/ingest/types.rs
use anyhow::Result;

/// A relevant feed entry before dedup and enrichment.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct FeedArticle {
    pub title: String,       // entities decoded
    pub description: String, // plain text
    pub link: String,        // dedup key
    pub date: String,        // YYYY-MM-DD
    pub source: String,      // feed domain, e.g. "rigzone.com"
}

/// Transport seam: turns a feed URL into raw feed bytes.
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
    fn name(&self) -> &'static str;
}
