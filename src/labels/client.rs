//!
//! Client seam for the remote labels service.
//!
//! This module defines the interface the sync controller uses to talk to the labels
//! service, plus an in-process implementation backed by a map of JSON-encoded batches.
//! The wire protocol itself belongs to the host application: any transport can sit
//! behind the trait, as long as it honors the session and overwrite semantics below.

use super::types::{LabelBatch, LabelsError};
use crate::utils::format_label_count;
use crate::wallet::types::{WalletHandle, WalletId};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use tracing::{debug, info};

/// Interface to the remote labels service.
///
/// The controller only ever calls through this trait. Implementations own transport,
/// encryption, and any timeout behavior.
#[async_trait::async_trait]
pub trait LabelsClient: Send + Sync {
	/// Begin a labels session for the wallet.
	///
	/// Must be called before `push`/`pull` for that wallet.
	async fn start_wallet(&self, wallet: &WalletHandle) -> Result<(), LabelsError>;

	/// End the labels session for the wallet.
	async fn stop_wallet(&self, wallet_id: &WalletId) -> Result<(), LabelsError>;

	/// Upload the wallet's labels to the service.
	///
	/// # Returns
	/// The number of labels uploaded.
	async fn push(&self, wallet: &WalletHandle) -> Result<usize, LabelsError>;

	/// Download remote labels into the wallet.
	///
	/// # Arguments
	/// * `wallet` - The wallet to merge labels into.
	/// * `force_overwrite` - Whether remote labels replace existing local ones.
	///
	/// # Returns
	/// The number of labels applied to the wallet.
	async fn pull(&self, wallet: &WalletHandle, force_overwrite: bool)
	-> Result<usize, LabelsError>;
}

/// In-process labels service backed by per-wallet JSON batches.
///
/// Payloads are stored encoded the way the real service would see them, so push/pull
/// exercise the same serialization path as a remote transport.
pub struct MemoryLabelsClient {
	/// JSON-encoded label batches keyed by wallet id.
	remote: Mutex<HashMap<WalletId, String>>,
	/// Wallets with an active labels session.
	sessions: Mutex<HashSet<WalletId>>,
}

impl MemoryLabelsClient {
	/// Create a new client with an empty remote store.
	pub fn new() -> Self {
		Self {
			remote: Mutex::new(HashMap::new()),
			sessions: Mutex::new(HashSet::new()),
		}
	}

	/// Seed the remote store with labels for a wallet, as if another device had
	/// uploaded them earlier.
	pub fn seed_remote(
		&self,
		wallet_id: WalletId,
		labels: HashMap<String, String>,
	) -> Result<(), LabelsError> {
		let batch = LabelBatch::from_labels(labels);
		let encoded = serde_json::to_string(&batch)?;
		self.remote.lock().unwrap().insert(wallet_id, encoded);
		Ok(())
	}

	fn ensure_session(&self, wallet_id: &WalletId) -> Result<(), LabelsError> {
		if self.sessions.lock().unwrap().contains(wallet_id) {
			Ok(())
		} else {
			Err(LabelsError::SessionError(format!(
				"No active labels session for wallet {}",
				wallet_id
			)))
		}
	}
}

impl Default for MemoryLabelsClient {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait::async_trait]
impl LabelsClient for MemoryLabelsClient {
	async fn start_wallet(&self, wallet: &WalletHandle) -> Result<(), LabelsError> {
		self.sessions.lock().unwrap().insert(wallet.id.clone());
		info!("Started labels session for wallet {}", wallet.id);
		Ok(())
	}

	async fn stop_wallet(&self, wallet_id: &WalletId) -> Result<(), LabelsError> {
		if !self.sessions.lock().unwrap().remove(wallet_id) {
			debug!("No labels session to stop for wallet {}", wallet_id);
		}
		Ok(())
	}

	async fn push(&self, wallet: &WalletHandle) -> Result<usize, LabelsError> {
		self.ensure_session(&wallet.id)?;

		let batch = LabelBatch::from_labels(wallet.labels_snapshot());
		let count = batch.len();
		let encoded = serde_json::to_string(&batch)?;
		self.remote.lock().unwrap().insert(wallet.id.clone(), encoded);

		info!(
			"Uploaded {} for wallet {}",
			format_label_count(count),
			wallet.id
		);
		Ok(count)
	}

	async fn pull(
		&self,
		wallet: &WalletHandle,
		force_overwrite: bool,
	) -> Result<usize, LabelsError> {
		self.ensure_session(&wallet.id)?;

		let encoded = self.remote.lock().unwrap().get(&wallet.id).cloned();
		let Some(encoded) = encoded else {
			debug!("No remote labels for wallet {}", wallet.id);
			return Ok(0);
		};

		let batch: LabelBatch = serde_json::from_str(&encoded)?;
		let applied = wallet.apply_labels(&batch.labels, force_overwrite);

		info!(
			"Received {} for wallet {}, applied {}",
			format_label_count(batch.len()),
			wallet.id,
			applied
		);
		Ok(applied)
	}
}
