// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod classify;
pub mod config;
pub mod dataset;
pub mod history;
pub mod ingest;
pub mod insights;
pub mod logging;
pub mod mirror;
pub mod pipeline;
pub mod relevance;
pub mod status;

// ---- Re-exports for stable public API ----
pub use crate::config::CollectorConfig;
pub use crate::dataset::ArticleRecord;
pub use crate::pipeline::{collect_news, RunSummary};
