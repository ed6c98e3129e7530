// src/mirror.rs
//! Best-effort copies of the finalized dataset to secondary locations.
//!
//! A failed mirror keeps its previous content (each copy is itself staged and
//! renamed) and stays stale until the next run that rewrites the dataset.

use metrics::counter;
use std::path::{Path, PathBuf};

use crate::dataset::copy_atomic;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MirrorReport {
    pub copied: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl MirrorReport {
    pub fn is_consistent(&self) -> bool {
        self.failed.is_empty()
    }
}

pub fn mirror_dataset(primary: &Path, mirrors: &[PathBuf]) -> MirrorReport {
    let mut report = MirrorReport::default();
    for target in mirrors {
        if target == primary {
            tracing::debug!(path = %target.display(), "mirror is the primary, skipping");
            continue;
        }
        match copy_atomic(primary, target) {
            Ok(()) => {
                tracing::info!(path = %target.display(), "copied dataset to mirror");
                report.copied.push(target.clone());
            }
            Err(e) => {
                let msg = format!("{e:#}");
                tracing::error!(
                    path = %target.display(),
                    error = %msg,
                    "mirror copy failed; mirror is stale until the next successful write"
                );
                counter!("collector_mirror_errors_total").increment(1);
                report.failed.push((target.clone(), msg));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn copies_and_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("data.csv");
        fs::write(&primary, "date,title\n").unwrap();

        // A regular file where a directory is expected makes the copy fail.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let ok = dir.path().join("web/data/data.csv");
        let bad = blocker.join("data.csv");
        let report = mirror_dataset(&primary, &[ok.clone(), bad.clone(), primary.clone()]);

        assert_eq!(report.copied, vec![ok.clone()]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, bad);
        assert!(!report.is_consistent());
        assert_eq!(fs::read_to_string(ok).unwrap(), "date,title\n");
    }
}
