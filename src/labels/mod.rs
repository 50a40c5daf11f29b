//! Labels-service integration module
//!
//! This module provides the client seam and types for talking to the remote labels
//! service. The service stores encrypted, user-assigned labels per wallet; this crate
//! only depends on the narrow push/pull/session interface defined here, leaving the
//! wire protocol to the host application.

/// Client seam for the remote labels service
mod client;
/// Type definitions for labels-service data structures
mod types;

pub use client::{LabelsClient, MemoryLabelsClient};
pub use types::*;
