//! Activity tracking for label synchronization.
//!
//! This module provides the `SyncActivityTracker`, which records completed upload and
//! download operations, counts labels moved, and keeps the outcome of the most recent
//! operation. The controller updates the tracker as background operations finish; hosts
//! read the aggregated `SyncStats` for display or diagnostics.

use crate::utils::format_label_count;
use serde::Serialize;

/// Outcome of a completed sync operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SyncOutcome {
    /// The operation completed; `labels` is the number moved.
    Success { labels: usize },
    /// The operation failed with the given reason.
    Failure { reason: String },
}

/// Service for tracking label sync activity
///
/// The tracker records how many uploads and downloads completed or failed, how many
/// labels moved in each direction, and when the controller was last active.
#[derive(Debug, Clone, Default)]
pub struct SyncActivityTracker {
    uploads_completed: usize,
    uploads_failed: usize,
    downloads_completed: usize,
    downloads_failed: usize,
    labels_uploaded: usize,
    labels_downloaded: usize,
    last_activity_at: Option<String>,
    last_outcome: Option<SyncOutcome>,
}

impl SyncActivityTracker {
    /// Create a tracker with no recorded activity.
    pub fn new() -> Self {
        Self::default()
    }

    fn touch(&mut self, outcome: SyncOutcome) {
        self.last_activity_at = Some(chrono::Utc::now().to_rfc3339());
        self.last_outcome = Some(outcome);
    }

    /// Record a completed upload of `labels` labels.
    pub fn record_upload(&mut self, labels: usize) {
        self.uploads_completed += 1;
        self.labels_uploaded += labels;
        self.touch(SyncOutcome::Success { labels });
    }

    /// Record a failed upload.
    pub fn record_upload_failure(&mut self, reason: &str) {
        self.uploads_failed += 1;
        self.touch(SyncOutcome::Failure {
            reason: reason.to_string(),
        });
    }

    /// Record a completed download of `labels` labels.
    pub fn record_download(&mut self, labels: usize) {
        self.downloads_completed += 1;
        self.labels_downloaded += labels;
        self.touch(SyncOutcome::Success { labels });
    }

    /// Record a failed download.
    pub fn record_download_failure(&mut self, reason: &str) {
        self.downloads_failed += 1;
        self.touch(SyncOutcome::Failure {
            reason: reason.to_string(),
        });
    }

    /// Total operations that completed successfully.
    pub fn operations_completed(&self) -> usize {
        self.uploads_completed + self.downloads_completed
    }

    /// Total operations that failed.
    pub fn operations_failed(&self) -> usize {
        self.uploads_failed + self.downloads_failed
    }

    /// Get activity statistics as a SyncStats struct
    pub fn get_stats(&self) -> SyncStats {
        SyncStats {
            uploads_completed: self.uploads_completed,
            uploads_failed: self.uploads_failed,
            downloads_completed: self.downloads_completed,
            downloads_failed: self.downloads_failed,
            labels_uploaded: self.labels_uploaded,
            labels_downloaded: self.labels_downloaded,
            last_activity_at: self.last_activity_at.clone(),
            last_outcome: self.last_outcome.clone(),
        }
    }
}

/// Statistics about label sync activity
///
/// This struct summarizes the controller's lifetime activity: operation counts per
/// direction, labels moved, and the most recent outcome.
#[derive(Debug, Clone, Serialize)]
pub struct SyncStats {
    pub uploads_completed: usize,
    pub uploads_failed: usize,
    pub downloads_completed: usize,
    pub downloads_failed: usize,
    pub labels_uploaded: usize,
    pub labels_downloaded: usize,
    pub last_activity_at: Option<String>,
    pub last_outcome: Option<SyncOutcome>,
}

impl SyncStats {
    /// Get a human-readable summary of the sync activity
    pub fn summary(&self) -> String {
        format!(
            "{} uploads ({} sent), {} downloads ({} received), {} failures{}",
            self.uploads_completed,
            format_label_count(self.labels_uploaded),
            self.downloads_completed,
            format_label_count(self.labels_downloaded),
            self.uploads_failed + self.downloads_failed,
            match &self.last_outcome {
                Some(SyncOutcome::Failure { reason }) => format!(" (last: {})", reason),
                _ => String::new(),
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_stats() {
        let mut tracker = SyncActivityTracker::new();
        tracker.record_upload(3);
        tracker.record_download(2);
        tracker.record_download_failure("connection reset");

        let stats = tracker.get_stats();
        assert_eq!(stats.uploads_completed, 1);
        assert_eq!(stats.downloads_completed, 1);
        assert_eq!(stats.downloads_failed, 1);
        assert_eq!(stats.labels_uploaded, 3);
        assert_eq!(stats.labels_downloaded, 2);
        assert_eq!(tracker.operations_completed(), 2);
        assert_eq!(tracker.operations_failed(), 1);
        assert!(stats.last_activity_at.is_some());
        assert_eq!(
            stats.last_outcome,
            Some(SyncOutcome::Failure {
                reason: "connection reset".to_string()
            })
        );
    }

    #[test]
    fn test_summary_mentions_last_failure() {
        let mut tracker = SyncActivityTracker::new();
        tracker.record_upload(1);
        tracker.record_upload_failure("server unreachable");

        let summary = tracker.get_stats().summary();
        assert!(summary.contains("1 uploads (1 label sent)"));
        assert!(summary.contains("server unreachable"));
    }

    #[test]
    fn test_empty_tracker_stats() {
        let stats = SyncActivityTracker::new().get_stats();
        assert_eq!(stats.uploads_completed, 0);
        assert!(stats.last_activity_at.is_none());
        assert!(stats.last_outcome.is_none());
        assert_eq!(stats.summary(), "0 uploads (0 labels sent), 0 downloads (0 labels received), 0 failures");
    }
}
