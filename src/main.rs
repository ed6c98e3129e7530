//! Deepwater News Collector — Binary Entrypoint
//! One fetch-filter-append pass per invocation; schedule it with cron.

use chrono::Utc;
use deepwater_news_collector::ingest::providers::HttpFeedSource;
use deepwater_news_collector::{collect_news, logging, CollectorConfig, RunSummary};

async fn run() -> anyhow::Result<RunSummary> {
    let cfg = CollectorConfig::load()?;
    let tz = cfg.tz()?;
    let source = HttpFeedSource::new(&cfg)?;
    collect_news(&cfg, &source, Utc::now().with_timezone(&tz)).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Load .env when present; no-op otherwise.
    let _ = dotenvy::dotenv();
    logging::init_tracing();

    // Errors end the run but never the scheduler invoking us: log and exit 0.
    match run().await {
        Ok(s) => tracing::info!(
            new_articles = s.new_articles,
            total = s.total_articles,
            feeds_failed = s.feeds_failed,
            mirrors_failed = s.mirrors.failed.len(),
            "collection finished"
        ),
        Err(e) => tracing::error!("unhandled error in collector run: {e:#}"),
    }
}
