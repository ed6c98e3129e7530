use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, TimeZone};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of `last_update.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastUpdate {
    pub last_updated: String, // YYYY-MM-DD in the configured zone
    pub timestamp: String,    // RFC 3339 with offset
}

impl LastUpdate {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            last_updated: now.format("%Y-%m-%d").to_string(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }
}

pub fn write_status<Tz: TimeZone>(path: &Path, now: &DateTime<Tz>) -> Result<LastUpdate>
where
    Tz::Offset: std::fmt::Display,
{
    let status = LastUpdate::at(now);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let body = serde_json::to_vec_pretty(&status)?;
    fs::write(path, body).with_context(|| format!("writing status {}", path.display()))?;
    tracing::info!(path = %path.display(), date = %status.last_updated, "saved last update timestamp");
    Ok(status)
}

pub fn read_status(path: &Path) -> Option<LastUpdate> {
    let s = fs::read_to_string(path).ok()?;
    serde_json::from_str(&s).ok()
}
