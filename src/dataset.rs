//! # Dataset
//!
//! The CSV dataset is the only persisted record of collected articles.
//!
//! - `url` is the unique key; loading dedups defensively (first row wins).
//! - Rows are kept sorted by date, newest first; ties keep their relative order.
//! - Every rewrite goes through a temp file in the target directory followed by
//!   a rename, so readers see either the old file or the new one, never a mix.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const HEADER: [&str; 8] = [
    "date",
    "title",
    "description",
    "source",
    "url",
    "category",
    "source_type",
    "insights",
];

/// Date formats accepted for sorting, in priority order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];

/// One dataset row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub date: String,
    pub title: String,
    pub description: String,
    pub source: String,
    pub url: String,
    pub category: String,
    pub source_type: String,
    pub insights: String,
}

/// Parse a row date for sorting. Unparseable dates sort as the oldest date.
pub fn parse_sort_date(s: &str) -> NaiveDate {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .unwrap_or_else(|| {
            tracing::warn!(date = s, "could not parse date format");
            NaiveDate::MIN
        })
}

/// Rows already on disk plus their URL set.
#[derive(Debug, Default)]
pub struct ExistingDataset {
    pub records: Vec<ArticleRecord>,
    pub urls: HashSet<String>,
}

/// Load the current dataset. A missing or unreadable file yields an empty
/// dataset; malformed rows are skipped.
pub fn read_existing(path: &Path) -> ExistingDataset {
    let mut out = ExistingDataset::default();

    let mut rdr = match csv::Reader::from_path(path) {
        Ok(r) => r,
        Err(e) => {
            match e.kind() {
                csv::ErrorKind::Io(io) if io.kind() == ErrorKind::NotFound => {
                    tracing::info!(path = %path.display(), "no existing dataset yet");
                }
                _ => tracing::warn!(path = %path.display(), error = %e, "error reading dataset"),
            }
            return out;
        }
    };

    let mut skipped = 0usize;
    for row in rdr.deserialize::<ArticleRecord>() {
        match row {
            Ok(rec) => {
                if out.urls.insert(rec.url.clone()) {
                    out.records.push(rec);
                }
            }
            Err(e) => {
                skipped += 1;
                tracing::warn!(path = %path.display(), error = %e, "skipping malformed dataset row");
            }
        }
    }

    tracing::info!(
        path = %path.display(),
        count = out.records.len(),
        skipped,
        "read existing articles"
    );
    out
}

/// Existing rows followed by new ones, deduplicated by url and sorted by date
/// descending (stable).
pub fn merge_records(
    existing: Vec<ArticleRecord>,
    new: Vec<ArticleRecord>,
) -> Vec<ArticleRecord> {
    let mut seen = HashSet::new();
    let mut all: Vec<ArticleRecord> = existing
        .into_iter()
        .chain(new)
        .filter(|r| seen.insert(r.url.clone()))
        .collect();
    all.sort_by_cached_key(|r| Reverse(parse_sort_date(&r.date)));
    all
}

/// A fully written dataset that has not replaced its target yet.
/// Dropping it without `commit` removes the temp file and leaves the target
/// untouched.
#[derive(Debug)]
pub struct StagedDataset {
    tmp: NamedTempFile,
    target: PathBuf,
    rows: usize,
}

impl StagedDataset {
    pub fn temp_path(&self) -> &Path {
        self.tmp.path()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Atomically replace the target with the staged file.
    pub fn commit(self) -> Result<()> {
        let target = self.target;
        self.tmp
            .persist(&target)
            .map_err(|e| e.error)
            .with_context(|| format!("replacing {}", target.display()))?;
        Ok(())
    }
}

pub(crate) fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

pub(crate) fn temp_beside(target: &Path) -> Result<NamedTempFile> {
    let dir = parent_dir(target);
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let stem = target
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset");
    tempfile::Builder::new()
        .prefix(&format!(".{stem}."))
        .suffix(".temp.csv")
        .tempfile_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))
}

/// Write header + rows to a temp file next to `target` and fsync it.
pub fn stage_dataset(target: &Path, records: &[ArticleRecord]) -> Result<StagedDataset> {
    let tmp = temp_beside(target)?;
    {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(tmp.as_file());
        wtr.write_record(HEADER)?;
        for rec in records {
            wtr.serialize(rec)?;
        }
        wtr.flush()
            .with_context(|| format!("writing {}", tmp.path().display()))?;
    }
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("syncing {}", tmp.path().display()))?;

    Ok(StagedDataset {
        tmp,
        target: target.to_path_buf(),
        rows: records.len(),
    })
}

/// Stage and commit in one go.
pub fn write_dataset(target: &Path, records: &[ArticleRecord]) -> Result<()> {
    stage_dataset(target, records)?.commit()?;
    tracing::info!(path = %target.display(), count = records.len(), "dataset written");
    Ok(())
}

/// Copy `src` into `target` through a temp file in the target's directory.
pub(crate) fn copy_atomic(src: &Path, target: &Path) -> Result<()> {
    let mut tmp = temp_beside(target)?;
    let mut input =
        fs::File::open(src).with_context(|| format!("opening {}", src.display()))?;
    std::io::copy(&mut input, &mut tmp)
        .with_context(|| format!("copying {} to {}", src.display(), target.display()))?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(target)
        .map_err(|e| e.error)
        .with_context(|| format!("replacing {}", target.display()))?;
    Ok(())
}
