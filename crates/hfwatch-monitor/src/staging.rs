//! Staging-directory observation.
//!
//! The transfer mechanism writes a blob's bytes to an `.incomplete` sibling
//! of its final content-addressed location and renames it when done. Watching
//! that file's growth is the only observable proxy for byte-level progress.
//!
//! Everything here is best-effort: a stat can race with creation or the
//! final rename, and the fallback scan can pick an unrelated artifact.
//! Observations are eventually consistent and never authoritative.

use std::path::{Path, PathBuf};

/// Suffix the transfer mechanism appends to in-progress blobs.
const INCOMPLETE_SUFFIX: &str = ".incomplete";

/// A staging directory for one repository's blobs.
#[derive(Debug, Clone)]
pub struct StagingLocation {
    staging_dir: PathBuf,
}

impl StagingLocation {
    /// Create a staging location for the given blobs directory.
    #[must_use]
    pub fn new(staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
        }
    }

    /// The directory being observed.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Deterministic in-progress path for a known blob id.
    #[must_use]
    pub fn incomplete_path(&self, blob_id: &str) -> PathBuf {
        self.staging_dir
            .join(format!("{blob_id}{INCOMPLETE_SUFFIX}"))
    }

    /// Final path for a known blob id.
    #[must_use]
    pub fn blob_path(&self, blob_id: &str) -> PathBuf {
        self.staging_dir.join(blob_id)
    }

    /// Observe the current byte count for a file in flight.
    ///
    /// With a known blob id the deterministic `.incomplete` path is checked
    /// first, then the final blob location (the transfer may have renamed it
    /// already). Without one, the most recently modified in-progress
    /// artifact in the directory is taken as the candidate. Any filesystem
    /// error means "no new data this tick" - never an error to the caller.
    #[must_use]
    pub fn observed_size(&self, blob_id: Option<&str>) -> Option<u64> {
        let candidates = match blob_id {
            Some(id) => vec![self.incomplete_path(id), self.blob_path(id)],
            None => self.latest_incomplete().into_iter().collect(),
        };

        for path in candidates {
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => return Some(meta.len()),
                Ok(_) => {}
                Err(err) => {
                    tracing::trace!(path = %path.display(), %err, "stat skipped");
                }
            }
        }
        None
    }

    /// Most recently modified `.incomplete` file in the staging directory.
    ///
    /// Heuristic fallback for transfers whose blob id is unknown.
    #[must_use]
    pub fn latest_incomplete(&self) -> Option<PathBuf> {
        let entries = std::fs::read_dir(&self.staging_dir).ok()?;

        let mut latest: Option<(std::time::SystemTime, PathBuf)> = None;
        for entry in entries.flatten() {
            let path = entry.path();
            let is_incomplete = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(INCOMPLETE_SUFFIX));
            if !is_incomplete {
                continue;
            }

            let Ok(meta) = entry.metadata() else { continue };
            let Ok(modified) = meta.modified() else {
                continue;
            };

            match latest {
                Some((ts, _)) if ts >= modified => {}
                _ => latest = Some((modified, path)),
            }
        }

        latest.map(|(_, path)| path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn incomplete_path_appends_suffix() {
        let staging = StagingLocation::new("/cache/models--o--n/blobs");
        assert_eq!(
            staging.incomplete_path("abc123"),
            PathBuf::from("/cache/models--o--n/blobs/abc123.incomplete")
        );
        assert_eq!(
            staging.blob_path("abc123"),
            PathBuf::from("/cache/models--o--n/blobs/abc123")
        );
    }

    #[test]
    fn observes_deterministic_incomplete_first() {
        let dir = tempfile::tempdir().unwrap();
        let staging = StagingLocation::new(dir.path());

        fs::write(staging.incomplete_path("blob"), vec![0u8; 42]).unwrap();
        fs::write(staging.blob_path("blob"), vec![0u8; 100]).unwrap();

        assert_eq!(staging.observed_size(Some("blob")), Some(42));
    }

    #[test]
    fn falls_back_to_final_blob_after_rename() {
        let dir = tempfile::tempdir().unwrap();
        let staging = StagingLocation::new(dir.path());

        fs::write(staging.blob_path("blob"), vec![0u8; 100]).unwrap();

        assert_eq!(staging.observed_size(Some("blob")), Some(100));
    }

    #[test]
    fn unknown_blob_scans_for_newest_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let staging = StagingLocation::new(dir.path());

        fs::write(dir.path().join("old.incomplete"), vec![0u8; 10]).unwrap();
        fs::write(dir.path().join("unrelated.bin"), vec![0u8; 999]).unwrap();
        // Ensure a strictly newer mtime on the second artifact
        let newer = dir.path().join("new.incomplete");
        fs::write(&newer, vec![0u8; 20]).unwrap();
        let later = std::time::SystemTime::now() + std::time::Duration::from_secs(10);
        let file = fs::File::open(&newer).unwrap();
        file.set_modified(later).unwrap();

        assert_eq!(staging.latest_incomplete(), Some(newer));
        assert_eq!(staging.observed_size(None), Some(20));
    }

    #[test]
    fn missing_directory_is_not_an_error() {
        let staging = StagingLocation::new("/definitely/not/a/real/dir");
        assert_eq!(staging.observed_size(Some("blob")), None);
        assert_eq!(staging.observed_size(None), None);
        assert_eq!(staging.latest_incomplete(), None);
    }
}
