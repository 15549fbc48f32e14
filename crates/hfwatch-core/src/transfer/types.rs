//! Core data structures for a transfer run.

use serde::{Deserialize, Serialize};

/// A single file in a remote artifact, as enumerated from its manifest.
///
/// Immutable once enumerated; owned by the orchestrator for the lifetime of
/// one transfer run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the repository root.
    pub path: String,
    /// Declared file size in bytes.
    pub size_bytes: u64,
    /// Content-addressed blob identifier, when the manifest exposes one.
    ///
    /// For LFS files this is the sha256 the cache stores the blob under;
    /// without it the poller falls back to scanning the staging directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob_id: Option<String>,
}

impl FileEntry {
    /// Create a file entry without a blob id.
    pub fn new(path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            blob_id: None,
        }
    }

    /// Create a file entry with a known blob id.
    pub fn with_blob_id(path: impl Into<String>, size_bytes: u64, blob_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            blob_id: Some(blob_id.into()),
        }
    }

    /// Get the filename without any leading directories.
    #[must_use]
    pub fn filename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// The ordered, sized list of files constituting one download run.
///
/// Sequence order is the download order. It is not required to be sorted,
/// but it is stable for the lifetime of the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPlan {
    /// Files in download order.
    pub files: Vec<FileEntry>,
}

impl TransferPlan {
    /// Create a plan from an ordered list of files.
    #[must_use]
    pub const fn new(files: Vec<FileEntry>) -> Self {
        Self { files }
    }

    /// Sum of all declared file sizes.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size_bytes).sum()
    }

    /// Number of files in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the plan contains no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_bytes_sums_declared_sizes() {
        let plan = TransferPlan::new(vec![
            FileEntry::new("config.json", 1_000),
            FileEntry::with_blob_id("model.safetensors", 4_000_000, "abc123"),
        ]);
        assert_eq!(plan.total_bytes(), 4_001_000);
        assert_eq!(plan.len(), 2);
        assert!(!plan.is_empty());
    }

    #[test]
    fn empty_plan_has_zero_total() {
        let plan = TransferPlan::default();
        assert_eq!(plan.total_bytes(), 0);
        assert!(plan.is_empty());
    }

    #[test]
    fn filename_strips_directories() {
        let entry = FileEntry::new("voices/en/ref.wav", 42);
        assert_eq!(entry.filename(), "ref.wav");

        let flat = FileEntry::new("tokenizer.json", 42);
        assert_eq!(flat.filename(), "tokenizer.json");
    }

    #[test]
    fn blob_id_omitted_from_json_when_absent() {
        let entry = FileEntry::new("config.json", 10);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("blob_id"));

        let entry = FileEntry::with_blob_id("model.bin", 10, "deadbeef");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("deadbeef"));
    }
}
