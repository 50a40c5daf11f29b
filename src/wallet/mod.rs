pub mod sync;
pub mod types;

pub use sync::SyncController;
pub use types::*;

use rand::Rng;

pub fn generate_wallet_id() -> types::WalletId {
	let mut raw = [0u8; 32];
	rand::rng().fill(&mut raw);
	types::WalletId(hex::encode(raw))
}
