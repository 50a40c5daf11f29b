//! Asynchronous label synchronization for wallet labels.
//!
//! This crate provides a sync controller that uploads and downloads user-assigned
//! wallet labels against a remote labels service without blocking the caller. The
//! service itself sits behind the [`LabelsClient`] trait; state changes and operation
//! outcomes are reported to registered [`NotificationSink`]s. At most one operation is
//! in flight at a time.

pub mod labels;
pub mod utils;
pub mod wallet;

pub use labels::{LabelBatch, LabelsClient, LabelsError, MemoryLabelsClient};
pub use wallet::generate_wallet_id;
pub use wallet::sync::controller::{SyncConfig, SyncController};
pub use wallet::sync::events::{
	LoggingSink, NotificationDispatcher, NotificationSink, SyncNotification,
};
pub use wallet::sync::registry::WalletRegistry;
pub use wallet::sync::tracker::{SyncActivityTracker, SyncOutcome, SyncStats};
pub use wallet::types::{SyncError, WalletHandle, WalletId};
