//! Types for the labels-service collaborator

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A batch of labels exchanged with the labels service.
///
/// This struct represents the payload of a single push or pull: label text keyed by the
/// item it annotates (an address or a transaction id).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelBatch {
    /// Label text keyed by the annotated item.
    pub labels: HashMap<String, String>,
}

impl LabelBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a batch from an existing label map.
    pub fn from_labels(labels: HashMap<String, String>) -> Self {
        Self { labels }
    }

    /// Number of labels in the batch.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check whether the batch carries no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Error types for labels-service operations and session management
#[derive(Debug, thiserror::Error)]
pub enum LabelsError {
    #[error("Remote error: {0}")]
    RemoteError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}
