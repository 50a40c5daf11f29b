use labels_sync::{
	LoggingSink, MemoryLabelsClient, SyncConfig, SyncController, WalletHandle,
	generate_wallet_id,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::from_default_env()
				.add_directive(tracing::Level::INFO.into()),
		)
		.with_target(false)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_file(false)
		.with_line_number(false)
		.with_timer(tracing_subscriber::fmt::time::time())
		.init();

	info!("Starting labels sync demo");

	let client = Arc::new(MemoryLabelsClient::new());

	// Pretend another device uploaded labels for this wallet earlier
	let wallet_id = generate_wallet_id();
	let mut remote_labels = HashMap::new();
	remote_labels.insert(
		"bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4".to_string(),
		"Exchange deposit".to_string(),
	);
	remote_labels.insert(
		"f4184fc596403b9d638783cf57adfe4c75c605f6356fbc91338530e9831e9e16".to_string(),
		"Rent payment".to_string(),
	);
	if let Err(e) = client.seed_remote(wallet_id.clone(), remote_labels) {
		error!("Failed to seed remote labels: {:?}", e);
		return;
	}

	let controller = SyncController::new(client.clone(), SyncConfig::default());
	controller.register_sink(Box::new(LoggingSink)).await;

	let wallet = WalletHandle::new(wallet_id.clone(), "demo-wallet".to_string());
	wallet.set_label(
		"bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq",
		"Cold storage",
	);

	if let Err(e) = controller.on_wallet_loaded(wallet.clone()).await {
		error!("Failed to start labels session: {:?}", e);
		return;
	}

	info!("Created sync controller");

	// Download remote labels, then report the data-layer hook as the service would
	match controller.request_download().await {
		Ok(handle) => {
			if let Err(e) = handle.await {
				error!("Download task failed: {:?}", e);
			}
		}
		Err(e) => error!("Download request rejected: {:?}", e),
	}
	controller.on_pulled(&wallet_id).await;

	match controller.request_upload().await {
		Ok(handle) => {
			if let Err(e) = handle.await {
				error!("Upload task failed: {:?}", e);
			}
		}
		Err(e) => error!("Upload request rejected: {:?}", e),
	}

	info!("Wallet now holds {} labels", wallet.label_count());

	let stats = controller.stats();
	info!("Sync activity: {}", stats.summary());
	match serde_json::to_string_pretty(&stats) {
		Ok(json) => info!("{}", json),
		Err(e) => error!("Failed to encode stats: {}", e),
	}
}
