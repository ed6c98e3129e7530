// src/ingest/providers/mod.rs
pub mod fixture;
pub mod http;

pub use fixture::FixtureFeedSource;
pub use http::HttpFeedSource;
