//! Error types for policy synthesis and conversion.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForgeError {
    /// Template text could not be read; fails the single-file conversion
    /// but not the surrounding batch.
    #[error("Failed to read template {path}: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Remote template could not be fetched.
    #[error("Failed to fetch template from {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The registry lookup itself failed, as opposed to the registry
    /// answering "no such type". May indicate a retryable condition.
    #[error("Registry lookup failed for {type_name}: {reason}")]
    Registry { type_name: String, reason: String },

    /// The source path cannot be expressed relative to the input root.
    #[error("Cannot express {path} relative to {root}")]
    PathMapping { path: PathBuf, root: PathBuf },

    /// The mapped output path is the source file itself; writing would
    /// destroy the template.
    #[error("Output path would overwrite source template {path}")]
    OutputCollision { path: PathBuf },

    #[error("Failed to read policy file {path}: {source}")]
    PolicyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write policy file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ForgeResult<T> = Result<T, ForgeError>;
