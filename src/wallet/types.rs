use crate::labels::LabelsError;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Identifier for a wallet participating in labels sync
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletId(pub String);

impl fmt::Display for WalletId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for WalletId {
	fn from(value: &str) -> Self {
		Self(value.to_string())
	}
}

/// Caller-owned handle to a wallet's label data.
///
/// The handle carries shared access to the wallet's label map; the sync controller never
/// reads or mutates labels itself, only the labels client does, through this handle.
#[derive(Debug, Clone)]
pub struct WalletHandle {
	/// Identity of the wallet, used for session tracking and lookup.
	pub id: WalletId,
	/// Display name of the wallet.
	pub name: String,
	labels: Arc<RwLock<HashMap<String, String>>>,
}

impl WalletHandle {
	/// Create a handle with no labels.
	pub fn new(id: WalletId, name: String) -> Self {
		Self::with_labels(id, name, HashMap::new())
	}

	/// Create a handle over an existing label map.
	pub fn with_labels(id: WalletId, name: String, labels: HashMap<String, String>) -> Self {
		Self {
			id,
			name,
			labels: Arc::new(RwLock::new(labels)),
		}
	}

	/// Assign a label to an item (address or transaction id).
	pub fn set_label(&self, key: &str, value: &str) {
		self.labels
			.write()
			.unwrap()
			.insert(key.to_string(), value.to_string());
	}

	/// Snapshot of the wallet's current labels.
	pub fn labels_snapshot(&self) -> HashMap<String, String> {
		self.labels.read().unwrap().clone()
	}

	/// Merge incoming labels into the wallet.
	///
	/// With `force_overwrite` every incoming label is applied; without it only labels
	/// the wallet does not already have are. Returns the number of labels applied.
	pub fn apply_labels(&self, incoming: &HashMap<String, String>, force_overwrite: bool) -> usize {
		let mut labels = self.labels.write().unwrap();
		let mut applied = 0;
		for (key, value) in incoming {
			if force_overwrite || !labels.contains_key(key) {
				labels.insert(key.clone(), value.clone());
				applied += 1;
			}
		}
		applied
	}

	/// Number of labels the wallet currently holds.
	pub fn label_count(&self) -> usize {
		self.labels.read().unwrap().len()
	}
}

/// Error types for label synchronization requests
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
	#[error("Labels client error: {0}")]
	ClientError(#[from] LabelsError),

	#[error("No current wallet")]
	NoActiveWallet,

	#[error("A label sync operation is already in progress")]
	AlreadyBusy,

	#[error("Sync task error: {0}")]
	TaskError(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_apply_labels_overwrite_semantics() {
		let wallet = WalletHandle::with_labels(
			WalletId::from("w1"),
			"test".to_string(),
			HashMap::from([("a".to_string(), "local".to_string())]),
		);
		let incoming = HashMap::from([
			("a".to_string(), "remote".to_string()),
			("b".to_string(), "new".to_string()),
		]);

		assert_eq!(wallet.apply_labels(&incoming, false), 1);
		assert_eq!(
			wallet.labels_snapshot().get("a").map(String::as_str),
			Some("local")
		);

		assert_eq!(wallet.apply_labels(&incoming, true), 2);
		assert_eq!(
			wallet.labels_snapshot().get("a").map(String::as_str),
			Some("remote")
		);
		assert_eq!(wallet.label_count(), 2);
	}

	#[test]
	fn test_handle_clones_share_labels() {
		let wallet = WalletHandle::new(WalletId::from("w1"), "test".to_string());
		let other = wallet.clone();
		other.set_label("bc1q", "shared");

		assert_eq!(wallet.label_count(), 1);
	}
}
