//! Label Synchronization Module
//!
//! This module provides the core logic for synchronizing a wallet's labels with the
//! remote labels service. It is composed of several submodules, each responsible for a
//! specific aspect of the sync process:
//!
//! - `controller`: The main entry point and coordinator for label sync. It validates
//!   requests, enforces single-flight discipline, and runs operations in the background.
//! - `events`: Defines the notification types, sink trait, and dispatcher used for
//!   decoupled reporting of sync state and outcomes.
//! - `registry`: Tracks wallet sessions and the current wallet for request routing and
//!   data-layer lookups.
//! - `tracker`: Records sync activity and provides statistics.
//!
//! The controller coordinates the sync process by checking preconditions, dispatching
//! notifications, and invoking the labels client on background tasks. Outcomes always
//! flow back through the notification channel, so callers observe state changes without
//! ever blocking on an operation.

/// Main coordinator for label sync requests
pub mod controller;
/// Notification channel for decoupled reporting of sync state
pub mod events;
/// Tracked wallet sessions and current-wallet lookup
pub mod registry;
/// Tracks synchronization activity and statistics
pub mod tracker;

pub use controller::*;
