// src/pipeline.rs
//! One collection pass:
//! load history + dataset → per feed fetch/filter/dedup/enrich → merge, write, mirror.

use anyhow::Result;
use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use metrics::counter;
use std::collections::HashSet;

use crate::classify::{Classifier, SourceTypeRules};
use crate::config::CollectorConfig;
use crate::dataset::{self, ArticleRecord};
use crate::history::HistoryStore;
use crate::ingest::{self, feed_domain, types::FeedSource};
use crate::insights::InsightExtractor;
use crate::mirror::{mirror_dataset, MirrorReport};
use crate::relevance::RelevanceFilter;
use crate::status;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub feeds_processed: usize,
    pub feeds_failed: usize,
    pub new_articles: usize,
    pub total_articles: usize,
    pub dataset_written: bool,
    pub mirrors: MirrorReport,
}

/// Everything derived from the config once per run.
struct Enricher {
    filter: RelevanceFilter,
    classifier: Classifier,
    source_types: SourceTypeRules,
    insights: InsightExtractor,
}

impl Enricher {
    fn from_config(cfg: &CollectorConfig) -> Self {
        Self {
            filter: cfg.relevance_filter(),
            classifier: cfg.classifier(),
            source_types: cfg.source_type_rules(),
            insights: cfg.insight_extractor(),
        }
    }
}

struct Batch {
    history: HistoryStore,
    known_urls: HashSet<String>,
    records: Vec<ArticleRecord>,
}

impl Batch {
    fn is_duplicate(&self, url: &str) -> bool {
        self.history.contains(url) || self.known_urls.contains(url)
    }

    /// History first: an id is on disk before its record joins the batch.
    fn accept(&mut self, rec: ArticleRecord) -> Result<()> {
        self.history.record(&rec.url)?;
        self.known_urls.insert(rec.url.clone());
        self.records.push(rec);
        counter!("collector_new_articles_total").increment(1);
        Ok(())
    }
}

async fn process_feed(
    cfg: &CollectorConfig,
    source: &dyn FeedSource,
    feed_url: &str,
    today: NaiveDate,
    enricher: &Enricher,
    batch: &mut Batch,
) -> Result<usize> {
    let domain = feed_domain(feed_url);
    let source_type = enricher.source_types.source_type_for(&domain);

    let articles = ingest::fetch_articles(
        source,
        feed_url,
        cfg.max_articles_per_source,
        &enricher.filter,
        today,
    )
    .await;

    let mut added = 0usize;
    for art in articles {
        if batch.is_duplicate(&art.link) {
            continue;
        }
        let text = format!("{} {}", art.title, art.description);
        let rec = ArticleRecord {
            category: enricher.classifier.classify(&text).to_string(),
            insights: enricher.insights.extract(&art.description),
            source_type: source_type.to_string(),
            date: art.date,
            title: art.title,
            description: art.description,
            source: art.source,
            url: art.link,
        };
        batch.accept(rec)?;
        added += 1;
    }
    Ok(added)
}

/// Run one pass. Per-feed failures are logged and skipped; only a failure to
/// open the history or to write the primary dataset is returned.
pub async fn collect_news(
    cfg: &CollectorConfig,
    source: &dyn FeedSource,
    now: DateTime<Tz>,
) -> Result<RunSummary> {
    tracing::info!(output = %cfg.output_csv.display(), "starting news collection");

    if let Err(e) = status::write_status(&cfg.status_path(), &now) {
        let msg = format!("{e:#}");
        tracing::error!(error = %msg, "error saving update timestamp");
    }

    let history = HistoryStore::open(&cfg.history_file)?;
    let existing = dataset::read_existing(&cfg.output_csv);
    tracing::info!(
        existing = existing.records.len(),
        history = history.len(),
        history_path = %history.path().display(),
        "loaded previous state"
    );

    let enricher = Enricher::from_config(cfg);
    if enricher.filter.is_empty() {
        tracing::warn!("relevance vocabulary is empty; no entry can be collected");
    } else {
        tracing::debug!(keywords = enricher.filter.len(), "relevance vocabulary loaded");
    }
    let today = now.date_naive();
    let mut batch = Batch {
        history,
        known_urls: existing.urls,
        records: Vec::new(),
    };
    let mut summary = RunSummary::default();

    let feeds: Vec<&str> = cfg
        .feeds
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect();

    for (i, feed_url) in feeds.iter().enumerate() {
        if i > 0 && !cfg.feed_delay().is_zero() {
            tokio::time::sleep(cfg.feed_delay()).await;
        }
        tracing::info!(feed = feed_url, "fetching articles");
        match process_feed(cfg, source, feed_url, today, &enricher, &mut batch).await {
            Ok(added) => {
                summary.feeds_processed += 1;
                tracing::debug!(feed = feed_url, added, "feed done");
            }
            Err(e) => {
                summary.feeds_failed += 1;
                let msg = format!("{e:#}");
                tracing::error!(feed = feed_url, error = %msg, "error processing feed");
            }
        }
    }

    summary.new_articles = batch.records.len();
    if batch.records.is_empty() {
        tracing::info!("no new articles found to add");
        summary.total_articles = existing.records.len();
        return Ok(summary);
    }
    tracing::info!(count = summary.new_articles, "found new articles to add");

    let merged = dataset::merge_records(existing.records, batch.records);
    dataset::write_dataset(&cfg.output_csv, &merged)?;
    summary.total_articles = merged.len();
    summary.dataset_written = true;

    summary.mirrors = mirror_dataset(&cfg.output_csv, &cfg.mirror_paths);
    if !summary.mirrors.is_consistent() {
        tracing::warn!(
            failed = summary.mirrors.failed.len(),
            "dataset mirrors diverged from primary"
        );
    }
    tracing::info!(total = summary.total_articles, "dataset update completed");
    Ok(summary)
}
