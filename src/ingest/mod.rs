// src/ingest/mod.rs
pub mod providers;
pub mod types;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use feed_rs::model::{Entry, Feed, Link};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use scraper::Html;

use crate::ingest::types::{FeedArticle, FeedSource};
use crate::relevance::RelevanceFilter;

/// One-time metrics registration.
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("collector_entries_total", "Feed entries inspected.");
        describe_counter!(
            "collector_relevant_total",
            "Entries that passed the relevance filter."
        );
        describe_counter!(
            "collector_feed_errors_total",
            "Feed fetch/parse errors."
        );
        describe_counter!(
            "collector_new_articles_total",
            "Articles accepted into the dataset batch."
        );
        describe_counter!(
            "collector_mirror_errors_total",
            "Failed mirror copies."
        );
    });
}

/// Strip markup to plain text: text nodes are trimmed and joined by a single
/// space. Entities are decoded exactly once, by the parser or, when the parser
/// gives up, after the regex tag stripper.
pub fn strip_html(s: &str) -> String {
    if s.trim().is_empty() {
        return String::new();
    }
    match html_to_text(s) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "html cleaning failed, using regex fallback");
            html_escape::decode_html_entities(&strip_tags_regex(s)).into_owned()
        }
    }
}

fn html_to_text(s: &str) -> Result<String> {
    let doc = Html::parse_fragment(s);
    let text = doc
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() && !doc.errors.is_empty() {
        bail!("fragment parsed to nothing: {}", doc.errors.join("; "));
    }
    Ok(text)
}

/// Last-resort cleaner: drop anything that looks like a tag.
pub fn strip_tags_regex(s: &str) -> String {
    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?s)<[^>]*>").unwrap());
    re.replace_all(s, "").trim().to_string()
}

/// Host of a feed URL without a leading `www.`; empty if the URL has no host.
pub fn feed_domain(url: &str) -> String {
    let host = url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

pub fn parse_feed(bytes: &[u8]) -> Result<Feed> {
    feed_rs::parser::parse(bytes).context("parsing feed")
}

/// Description preference: summary, then first content body.
fn entry_description(entry: &Entry) -> String {
    let raw = entry
        .summary
        .as_ref()
        .map(|t| t.content.as_str())
        .or_else(|| entry.content.as_ref().and_then(|c| c.body.as_deref()))
        .unwrap_or_default();
    strip_html(raw)
}

/// Article URL: first `alternate` link (or one without `rel`), else the first
/// link, else an http(s) entry id such as an RSS permalink guid.
pub fn entry_link(entry: &Entry) -> Option<String> {
    fn href(l: &Link) -> Option<&str> {
        Some(l.href.trim()).filter(|h| !h.is_empty())
    }
    let from_links = entry
        .links
        .iter()
        .filter(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .find_map(href)
        .or_else(|| entry.links.iter().find_map(href));
    if let Some(link) = from_links {
        return Some(link.to_string());
    }
    let id = entry.id.trim();
    match url::Url::parse(id) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => Some(id.to_string()),
        _ => None,
    }
}

/// Walk at most `2 * max_articles` entries and keep the relevant ones, stopping
/// once `max_articles` are collected.
pub fn select_relevant(
    feed: &Feed,
    domain: &str,
    max_articles: usize,
    filter: &RelevanceFilter,
    today: NaiveDate,
) -> Vec<FeedArticle> {
    ensure_metrics_described();

    let mut out = Vec::with_capacity(max_articles);
    for entry in feed.entries.iter().take(max_articles.saturating_mul(2)) {
        counter!("collector_entries_total").increment(1);

        let Some(link) = entry_link(entry) else {
            tracing::debug!(entry = %entry.id, "entry without link skipped");
            continue;
        };

        let title = entry
            .title
            .as_ref()
            .map(|t| html_escape::decode_html_entities(t.content.trim()).into_owned())
            .unwrap_or_default();
        let description = entry_description(entry);

        if !filter.is_relevant(&title, &description) {
            continue;
        }
        counter!("collector_relevant_total").increment(1);

        let date = entry
            .published
            .or(entry.updated)
            .map(|d| d.date_naive())
            .unwrap_or(today);

        out.push(FeedArticle {
            title,
            description,
            link,
            date: date.format("%Y-%m-%d").to_string(),
            source: domain.to_string(),
        });
        if out.len() >= max_articles {
            break;
        }
    }
    out
}

/// Fetch, parse and filter one feed. Never fails: any error is logged and
/// the feed contributes nothing.
pub async fn fetch_articles(
    source: &dyn FeedSource,
    url: &str,
    max_articles: usize,
    filter: &RelevanceFilter,
    today: NaiveDate,
) -> Vec<FeedArticle> {
    ensure_metrics_described();

    let feed = match source.fetch(url).await.and_then(|b| parse_feed(&b)) {
        Ok(f) => f,
        Err(e) => {
            let msg = format!("{e:#}");
            tracing::error!(feed = url, provider = source.name(), error = %msg, "error fetching feed");
            counter!("collector_feed_errors_total").increment(1);
            return Vec::new();
        }
    };

    if feed.entries.is_empty() {
        tracing::warn!(feed = url, "no entries found in feed");
        return Vec::new();
    }

    let domain = feed_domain(url);
    tracing::info!(domain = %domain, entries = feed.entries.len(), "processing feed entries");
    let out = select_relevant(&feed, &domain, max_articles, filter, today);
    tracing::info!(domain = %domain, count = out.len(), "relevant articles found");
    out
}
