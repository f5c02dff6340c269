//! Snapshot export/import for the whole document tree

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::section::Section;
use crate::core::store::DocumentStore;

/// Failures while decoding a snapshot file. The live tree is never touched
/// until decoding has fully succeeded.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("invalid file format: missing `sections` array")]
    InvalidFormat,
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// The full exportable representation of the document tree.
///
/// Transient render flags are excluded from serialization, so an exported
/// file re-imported over the same tree is a no-op for durable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    pub sections: Vec<Section>,
}

impl Snapshot {
    /// Capture the current tree with a fresh timestamp.
    pub fn capture(store: &DocumentStore) -> Self {
        Self {
            timestamp: Utc::now(),
            sections: store.sections().to_vec(),
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Decode a snapshot, validating up front that `sections` is present
    /// and is a sequence.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        match value.get("sections") {
            Some(serde_json::Value::Array(_)) => {}
            _ => return Err(SnapshotError::InvalidFormat),
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Default export file name, stamped with the snapshot date.
    pub fn default_file_name(&self) -> String {
        format!("nctu_portfolio_{}.json", self.timestamp.format("%Y-%m-%d"))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
        tracing::info!("Saved snapshot: {}", path.display());
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
        let snapshot = Self::from_json(&raw)
            .with_context(|| format!("Failed to decode snapshot: {}", path.display()))?;
        tracing::info!(
            sections = snapshot.sections.len(),
            "Loaded snapshot: {}",
            path.display()
        );
        Ok(snapshot)
    }
}
