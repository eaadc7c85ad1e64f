use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use serde::{Deserialize, Serialize};
use tessitura_core::FileRecord;

use crate::confirm::Confirm;

/// Output schema tag; bump when the record layout changes.
pub const SCHEMA_VERSION: &str = "0.1";

/// The one JSON document an invocation produces.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchDocument {
    pub files: Vec<FileRecord>,
    /// ISO-8601 generation time.
    pub timestamp: String,
    pub version: String,
}

impl BatchDocument {
    pub fn new(files: Vec<FileRecord>) -> Self {
        BatchDocument {
            files,
            timestamp: Local::now().to_rfc3339(),
            version: SCHEMA_VERSION.to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum WriteStatus {
    Written(PathBuf),
    Declined(PathBuf),
}

/// Persist the document as compact JSON, subject to the overwrite
/// policy. The document is serialized in full before any byte reaches
/// the destination, so a failure here leaves either the old file or a
/// complete new one.
pub fn write_output(
    path: &Path,
    document: &BatchDocument,
    confirm: &dyn Confirm,
) -> anyhow::Result<WriteStatus> {
    if path.is_file() && !confirm.confirm(path) {
        return Ok(WriteStatus::Declined(path.to_path_buf()));
    }

    let json = serde_json::to_string(document).context("Failed to serialize output document")?;
    fs::write(path, json).with_context(|| format!("Failed to write output to {}", path.display()))?;

    Ok(WriteStatus::Written(path.to_path_buf()))
}
