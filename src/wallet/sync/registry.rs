use crate::wallet::types::{WalletHandle, WalletId};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info};

/// Registry of wallets currently tracked for labels sync.
///
/// The registry backs the controller's current-wallet precondition and the identity
/// lookup performed when the data layer reports pulled labels. The current wallet is
/// the one most recently loaded, unless the host moved it explicitly.
pub struct WalletRegistry {
	wallets: Mutex<HashMap<WalletId, WalletHandle>>,
	current: Mutex<Option<WalletId>>,
}

impl WalletRegistry {
	pub fn new() -> Self {
		Self {
			wallets: Mutex::new(HashMap::new()),
			current: Mutex::new(None),
		}
	}

	/// Track a wallet and make it the current one.
	pub fn track(&self, wallet: WalletHandle) {
		let id = wallet.id.clone();
		self.wallets.lock().unwrap().insert(id.clone(), wallet);
		*self.current.lock().unwrap() = Some(id.clone());
		info!("Tracking wallet {} for labels sync", id);
	}

	/// Stop tracking a wallet, clearing the current pointer if it pointed at it.
	pub fn untrack(&self, wallet_id: &WalletId) -> Option<WalletHandle> {
		let removed = self.wallets.lock().unwrap().remove(wallet_id);
		if removed.is_some() {
			let mut current = self.current.lock().unwrap();
			if current.as_ref() == Some(wallet_id) {
				*current = None;
			}
			info!("Stopped tracking wallet {}", wallet_id);
		} else {
			debug!("Wallet {} was not tracked", wallet_id);
		}
		removed
	}

	/// Look a tracked wallet up by identity.
	pub fn find(&self, wallet_id: &WalletId) -> Option<WalletHandle> {
		self.wallets.lock().unwrap().get(wallet_id).cloned()
	}

	/// The wallet sync requests operate on, if any.
	pub fn current_wallet(&self) -> Option<WalletHandle> {
		let current = self.current.lock().unwrap().clone();
		current.and_then(|id| self.find(&id))
	}

	/// Point the current wallet at an already-tracked one.
	///
	/// Returns false if the wallet is not tracked.
	pub fn set_current(&self, wallet_id: &WalletId) -> bool {
		if self.wallets.lock().unwrap().contains_key(wallet_id) {
			*self.current.lock().unwrap() = Some(wallet_id.clone());
			true
		} else {
			false
		}
	}

	pub fn len(&self) -> usize {
		self.wallets.lock().unwrap().len()
	}

	pub fn is_empty(&self) -> bool {
		self.wallets.lock().unwrap().is_empty()
	}
}

impl Default for WalletRegistry {
	fn default() -> Self {
		Self::new()
	}
}
