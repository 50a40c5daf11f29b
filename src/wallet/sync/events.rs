//! Notification channel for label synchronization.
//!
//! This module defines the notification types, the sink trait, and the dispatcher used
//! throughout label sync. Notifications decouple the sync controller from whatever
//! consumes its state changes: the controller emits, registered sinks observe. A UI
//! layer adapts the sink trait to its own binding mechanism; nothing in this crate
//! knows about any toolkit.
//!
//! Delivery is ordered and lossless from the controller's point of view: sinks are
//! called in registration order, and a failing sink does not stop the others.

use crate::wallet::types::{SyncError, WalletId};
use serde::{Deserialize, Serialize};

/// Notifications emitted during label synchronization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncNotification {
    /// The plugin's enabled state changed
    PluginEnabledChanged { enabled: bool },
    /// An operation started or finished
    BusyChanged { busy: bool },
    /// A label upload completed
    UploadSucceeded,
    /// A label upload failed
    UploadFailed { reason: String },
    /// A label download completed
    DownloadSucceeded,
    /// A label download failed
    DownloadFailed { reason: String },
    /// Labels for a tracked wallet changed at the data layer
    LabelsUpdated { wallet_id: WalletId },
    /// Free-text message intended for user display
    UserNotify { message: String },
}

/// Trait for consuming sync notifications.
///
/// Implementors receive every notification the controller emits and can perform side
/// effects or state updates.
#[async_trait::async_trait]
pub trait NotificationSink: Send + Sync {
    /// Handle a notification.
    ///
    /// This method is called for every notification dispatched by the controller.
    async fn notify(&mut self, notification: &SyncNotification) -> Result<(), SyncError>;

    /// Get the name of this sink for logging and diagnostics.
    fn name(&self) -> &'static str;
}

/// Dispatcher that fans notifications out to registered sinks.
///
/// The dispatcher allows multiple sinks to be registered and ensures all are called for
/// each notification. This enables logging, UI state, and bookkeeping to be handled
/// independently.
pub struct NotificationDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl NotificationDispatcher {
    /// Create a new, empty dispatcher.
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    /// Register a new sink.
    ///
    /// Sinks are called in the order they are registered.
    pub fn register_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Dispatch a notification to all registered sinks.
    ///
    /// Errors from sinks are logged, but do not stop other sinks from running.
    pub async fn dispatch(&mut self, notification: &SyncNotification) {
        for sink in &mut self.sinks {
            if let Err(e) = sink.notify(notification).await {
                tracing::error!(
                    "Sink {} failed to process notification: {}",
                    sink.name(),
                    e
                );
                // Continue delivering to other sinks
            }
        }
    }
}

/// Sink that logs every notification it receives.
///
/// User-facing messages are logged at info level, state changes at debug.
pub struct LoggingSink;

#[async_trait::async_trait]
impl NotificationSink for LoggingSink {
    async fn notify(&mut self, notification: &SyncNotification) -> Result<(), SyncError> {
        match notification {
            SyncNotification::UserNotify { message } => {
                tracing::info!("User notification: {}", message);
            }
            other => {
                tracing::debug!("Notification: {:?}", other);
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "LoggingSink"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingSink {
        seen: Arc<Mutex<Vec<SyncNotification>>>,
    }

    #[async_trait::async_trait]
    impl NotificationSink for RecordingSink {
        async fn notify(&mut self, notification: &SyncNotification) -> Result<(), SyncError> {
            self.seen.lock().unwrap().push(notification.clone());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "RecordingSink"
        }
    }

    struct FailingSink;

    #[async_trait::async_trait]
    impl NotificationSink for FailingSink {
        async fn notify(&mut self, _notification: &SyncNotification) -> Result<(), SyncError> {
            Err(SyncError::TaskError("sink failed".to_string()))
        }

        fn name(&self) -> &'static str {
            "FailingSink"
        }
    }

    #[tokio::test]
    async fn test_dispatch_reaches_all_sinks_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = NotificationDispatcher::new();
        dispatcher.register_sink(Box::new(RecordingSink { seen: seen.clone() }));

        dispatcher
            .dispatch(&SyncNotification::BusyChanged { busy: true })
            .await;
        dispatcher
            .dispatch(&SyncNotification::BusyChanged { busy: false })
            .await;

        let events = seen.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                SyncNotification::BusyChanged { busy: true },
                SyncNotification::BusyChanged { busy: false },
            ]
        );
    }

    #[tokio::test]
    async fn test_failing_sink_does_not_block_others() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = NotificationDispatcher::new();
        dispatcher.register_sink(Box::new(FailingSink));
        dispatcher.register_sink(Box::new(RecordingSink { seen: seen.clone() }));

        dispatcher.dispatch(&SyncNotification::UploadSucceeded).await;

        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}
