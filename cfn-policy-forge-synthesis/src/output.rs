//! Policy document I/O: pretty-printed JSON on disk.

use std::path::Path;

use tokio::fs;

use crate::error::{ForgeError, ForgeResult};
use crate::types::PolicyDocument;

/// Write a policy document as pretty-printed JSON, creating parent
/// directories as needed.
pub async fn write_policy(path: &Path, document: &PolicyDocument) -> ForgeResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| ForgeError::OutputWrite {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
    }

    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json)
        .await
        .map_err(|source| ForgeError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a policy document back from disk.
pub async fn read_policy(path: &Path) -> ForgeResult<PolicyDocument> {
    let raw = fs::read_to_string(path)
        .await
        .map_err(|source| ForgeError::PolicyRead {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(serde_json::from_str(&raw)?)
}
