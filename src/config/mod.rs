// src/config/mod.rs
//! Collector configuration: feed list, vocabularies, category table and paths.
//!
//! Loaded once at startup and passed down by reference; nothing below `main`
//! reads the environment or global state.

pub mod defaults;

use anyhow::{anyhow, bail, Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::classify::{CategoryRule, Classifier, SourceType, SourceTypeRules};
use crate::insights::InsightExtractor;
use crate::relevance::RelevanceFilter;
use defaults::owned;

pub const ENV_CONFIG_PATH: &str = "COLLECTOR_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/collector.toml";

/// One row of the ordered category table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryCfg {
    pub tag: String,
    pub keywords: Vec<String>,
}

/// Domain markers that put a feed into a source type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceTypeCfg {
    pub kind: SourceType,
    pub domain_markers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectorConfig {
    pub output_csv: PathBuf,
    pub history_file: PathBuf,
    pub mirror_paths: Vec<PathBuf>,
    /// Defaults to `last_update.json` next to `output_csv`.
    pub status_file: Option<PathBuf>,
    pub max_articles_per_source: usize,
    pub feed_delay_secs: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub accept_invalid_certs: bool,
    /// IANA zone used for the status file and for undated entries.
    pub timezone: String,
    pub feeds: Vec<String>,
    pub relevance_keywords: Vec<String>,
    pub industry_terms: Vec<String>,
    pub default_category: String,
    /// Evaluated in file order; first match wins.
    pub categories: Vec<CategoryCfg>,
    pub source_types: Vec<SourceTypeCfg>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            output_csv: PathBuf::from(defaults::DEFAULT_OUTPUT_CSV),
            history_file: PathBuf::from(defaults::DEFAULT_HISTORY_FILE),
            mirror_paths: defaults::DEFAULT_MIRROR_PATHS
                .iter()
                .map(PathBuf::from)
                .collect(),
            status_file: None,
            max_articles_per_source: defaults::DEFAULT_MAX_ARTICLES_PER_SOURCE,
            feed_delay_secs: defaults::DEFAULT_FEED_DELAY_SECS,
            request_timeout_secs: defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: defaults::DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: false,
            timezone: defaults::DEFAULT_TIMEZONE.to_string(),
            feeds: owned(defaults::FEEDS),
            relevance_keywords: owned(defaults::RELEVANCE_KEYWORDS),
            industry_terms: owned(defaults::INDUSTRY_TERMS),
            default_category: defaults::DEFAULT_CATEGORY.to_string(),
            categories: defaults::CATEGORY_TABLE
                .iter()
                .map(|(tag, kws)| CategoryCfg {
                    tag: tag.to_string(),
                    keywords: owned(kws),
                })
                .collect(),
            source_types: defaults::SOURCE_TYPE_MARKERS
                .iter()
                .filter_map(|(kind, markers)| {
                    Some(SourceTypeCfg {
                        kind: SourceType::from_label(kind)?,
                        domain_markers: owned(markers),
                    })
                })
                .collect(),
        }
    }
}

impl CollectorConfig {
    /// Resolve the config file:
    /// 1) $COLLECTOR_CONFIG_PATH (must exist)
    /// 2) config/collector.toml
    /// 3) built-in defaults
    pub fn load() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                bail!(
                    "{} points to non-existent path {}",
                    ENV_CONFIG_PATH,
                    pb.display()
                );
            }
            return Self::load_from(&pb);
        }
        let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
        if fallback.exists() {
            return Self::load_from(&fallback);
        }
        tracing::info!("no config file found, using built-in defaults");
        let cfg = Self::default();
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading collector config from {}", path.display()))?;
        let cfg = Self::from_toml_str(&content)
            .with_context(|| format!("parsing collector config {}", path.display()))?;
        tracing::info!(path = %path.display(), feeds = cfg.feeds.len(), "loaded collector config");
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: CollectorConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        self.tz()?;
        if self.feeds.iter().all(|f| f.trim().is_empty()) {
            bail!("feed list is empty");
        }
        if self.max_articles_per_source == 0 {
            bail!("max_articles_per_source must be at least 1");
        }
        if let Some(c) = self.categories.iter().find(|c| c.tag.trim().is_empty()) {
            bail!("category with keywords {:?} has a blank tag", c.keywords);
        }
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("unknown time zone `{}`: {}", self.timezone, e))
    }

    pub fn feed_delay(&self) -> Duration {
        Duration::from_secs(self.feed_delay_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn status_path(&self) -> PathBuf {
        match &self.status_file {
            Some(p) => p.clone(),
            None => self
                .output_csv
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join("last_update.json"),
        }
    }

    pub fn relevance_filter(&self) -> RelevanceFilter {
        RelevanceFilter::new(&self.relevance_keywords)
    }

    pub fn classifier(&self) -> Classifier {
        let rules = self
            .categories
            .iter()
            .map(|c| CategoryRule::any_keyword(&c.tag, &c.keywords))
            .collect();
        Classifier::new(rules, &self.default_category)
    }

    pub fn source_type_rules(&self) -> SourceTypeRules {
        SourceTypeRules::new(
            self.source_types
                .iter()
                .map(|s| (s.kind, s.domain_markers.clone()))
                .collect(),
        )
    }

    pub fn insight_extractor(&self) -> InsightExtractor {
        InsightExtractor::new(&self.industry_terms)
    }
}
