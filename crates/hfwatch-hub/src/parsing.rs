//! JSON parsing for Hub API responses.
//!
//! Sync functions converting raw tree-endpoint JSON into domain
//! [`FileEntry`] values.

use hfwatch_core::FileEntry;
use serde_json::Value;

use crate::error::{HubError, HubResult};

/// Parse one page of the tree endpoint into file entries.
///
/// Directories are skipped. For LFS entries the LFS oid (sha256) is used as
/// the blob id since that is the name the cache stores the blob under; plain
/// git objects fall back to their git oid. Entries without a path are
/// ignored rather than failing the whole enumeration.
pub fn parse_tree_entries(json: &Value) -> HubResult<Vec<FileEntry>> {
    let entries = json.as_array().ok_or_else(|| HubError::InvalidResponse {
        message: "tree response is not an array".to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        if entry.get("type").and_then(Value::as_str) != Some("file") {
            continue;
        }

        let Some(path) = entry.get("path").and_then(Value::as_str) else {
            tracing::debug!("skipping tree entry without a path");
            continue;
        };

        let lfs = entry.get("lfs");
        let size = lfs
            .and_then(|l| l.get("size"))
            .and_then(Value::as_u64)
            .or_else(|| entry.get("size").and_then(Value::as_u64))
            .unwrap_or(0);

        let blob_id = lfs
            .and_then(|l| l.get("oid"))
            .and_then(Value::as_str)
            .or_else(|| entry.get("oid").and_then(Value::as_str))
            .map(std::string::ToString::to_string);

        files.push(FileEntry {
            path: path.to_string(),
            size_bytes: size,
            blob_id,
        });
    }

    Ok(files)
}
