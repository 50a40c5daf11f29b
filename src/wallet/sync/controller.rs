//! Label sync controller and integration point for all sync services.
//!
//! This module defines the `SyncController`, which mediates between caller-issued sync
//! requests and the labels client. It owns the busy/enabled state, enforces single-flight
//! discipline, runs each accepted operation on a background task, and reports outcomes
//! through the notification dispatcher.
//!
//! The controller is responsible for:
//! - Validating that a current wallet exists before dispatching an operation
//! - Enforcing at most one in-flight upload or download at a time
//! - Spawning background tasks that call the labels client without blocking the caller
//! - Converting every client failure into an outcome notification, never a propagated error
//! - Clearing the busy flag and emitting `BusyChanged` as the final step of every operation
//!
//! Lifecycle hooks (`on_wallet_loaded`, `on_wallet_closed`, `on_pulled`) keep the wallet
//! registry in step with the host application.

use crate::labels::LabelsClient;
use crate::utils::format_label_count;
use crate::wallet::sync::{
    events::{NotificationDispatcher, NotificationSink, SyncNotification},
    registry::WalletRegistry,
    tracker::{SyncActivityTracker, SyncStats},
};
use crate::wallet::types::{SyncError, WalletHandle, WalletId};

use std::sync::Mutex as StdMutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Configuration for the sync controller
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Whether downloads overwrite existing local labels
    pub force_overwrite: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            force_overwrite: true,
        }
    }
}

/// Direction a background operation moves labels in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncDirection {
    Upload,
    Download,
}

/// Controller that mediates label sync requests against the labels client.
///
/// This struct is the entry point for label synchronization. Requests dispatch a
/// background task and return immediately; outcomes are reported to registered
/// notification sinks. All state is interior, so the controller can be shared behind an
/// `Arc` across the host application.
pub struct SyncController {
    client: Arc<dyn LabelsClient>,
    registry: WalletRegistry,

    // Shared with background tasks
    dispatcher: Arc<Mutex<NotificationDispatcher>>,
    tracker: Arc<StdMutex<SyncActivityTracker>>,
    busy: Arc<AtomicBool>,

    enabled: AtomicBool,
    config: SyncConfig,
}

impl SyncController {
    /// Create a new controller around the given labels client.
    pub fn new(client: Arc<dyn LabelsClient>, config: SyncConfig) -> Self {
        Self {
            client,
            registry: WalletRegistry::new(),
            dispatcher: Arc::new(Mutex::new(NotificationDispatcher::new())),
            tracker: Arc::new(StdMutex::new(SyncActivityTracker::new())),
            busy: Arc::new(AtomicBool::new(false)),
            enabled: AtomicBool::new(true),
            config,
        }
    }

    /// Register a notification sink.
    ///
    /// Sinks receive every notification in registration order.
    pub async fn register_sink(&self, sink: Box<dyn NotificationSink>) {
        self.dispatcher.lock().await.register_sink(sink);
    }

    /// Whether an upload or download is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Whether labels sync is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Flip the enabled state, notifying sinks when the value changes.
    pub async fn set_enabled(&self, enabled: bool) {
        if self.enabled.swap(enabled, Ordering::SeqCst) != enabled {
            info!("Labels sync {}", if enabled { "enabled" } else { "disabled" });
            self.dispatcher
                .lock()
                .await
                .dispatch(&SyncNotification::PluginEnabledChanged { enabled })
                .await;
        }
    }

    /// Wallets currently tracked for labels sync.
    pub fn registry(&self) -> &WalletRegistry {
        &self.registry
    }

    /// Snapshot of lifetime sync activity.
    pub fn stats(&self) -> SyncStats {
        self.tracker.lock().unwrap().get_stats()
    }

    /// Load wallet hook: start a labels session and track the wallet.
    ///
    /// The loaded wallet becomes the current one for subsequent requests.
    pub async fn on_wallet_loaded(&self, wallet: WalletHandle) -> Result<(), SyncError> {
        info!("Load wallet hook for wallet {}", wallet.id);
        self.client.start_wallet(&wallet).await?;
        self.registry.track(wallet);
        Ok(())
    }

    /// Close wallet hook: end the labels session and stop tracking the wallet.
    pub async fn on_wallet_closed(&self, wallet_id: &WalletId) -> Result<(), SyncError> {
        info!("Close wallet hook for wallet {}", wallet_id);
        self.client.stop_wallet(wallet_id).await?;
        self.registry.untrack(wallet_id);
        Ok(())
    }

    /// Data-layer hook: the labels client pulled labels for a wallet.
    ///
    /// Independent of the download request chain. If the wallet is tracked, sinks get a
    /// `LabelsUpdated` notification; an unknown wallet is logged and ignored.
    pub async fn on_pulled(&self, wallet_id: &WalletId) {
        info!("On pulled for wallet {}", wallet_id);
        match self.registry.find(wallet_id) {
            Some(_) => {
                debug!("Wallet found");
                self.dispatcher
                    .lock()
                    .await
                    .dispatch(&SyncNotification::LabelsUpdated {
                        wallet_id: wallet_id.clone(),
                    })
                    .await;
            }
            None => {
                debug!("Wallet not found");
            }
        }
    }

    /// Request a background upload of the current wallet's labels.
    ///
    /// Returns the handle of the spawned task; the outcome itself is reported through
    /// the notification channel. The call never blocks on the operation.
    pub async fn request_upload(&self) -> Result<JoinHandle<()>, SyncError> {
        self.request(SyncDirection::Upload, self.config.force_overwrite)
            .await
    }

    /// Request a background download of remote labels into the current wallet,
    /// using the configured overwrite policy.
    pub async fn request_download(&self) -> Result<JoinHandle<()>, SyncError> {
        self.request(SyncDirection::Download, self.config.force_overwrite)
            .await
    }

    /// Request a background download with an explicit overwrite policy.
    pub async fn request_download_with(
        &self,
        force_overwrite: bool,
    ) -> Result<JoinHandle<()>, SyncError> {
        self.request(SyncDirection::Download, force_overwrite).await
    }

    async fn request(
        &self,
        direction: SyncDirection,
        force_overwrite: bool,
    ) -> Result<JoinHandle<()>, SyncError> {
        let Some(wallet) = self.registry.current_wallet() else {
            error!("No current wallet");
            let reason = SyncError::NoActiveWallet.to_string();
            let failed = match direction {
                SyncDirection::Upload => SyncNotification::UploadFailed {
                    reason: reason.clone(),
                },
                SyncDirection::Download => SyncNotification::DownloadFailed {
                    reason: reason.clone(),
                },
            };
            let mut dispatcher = self.dispatcher.lock().await;
            dispatcher.dispatch(&failed).await;
            dispatcher
                .dispatch(&SyncNotification::UserNotify { message: reason })
                .await;
            return Err(SyncError::NoActiveWallet);
        };

        // Single-flight: the compare-and-swap is the only gate, so concurrent
        // requests of either kind cannot both pass
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!(
                "Rejecting {:?} request for wallet {}: an operation is already in flight",
                direction, wallet.id
            );
            return Err(SyncError::AlreadyBusy);
        }

        info!("Starting label {:?} for wallet {}", direction, wallet.id);
        self.dispatcher
            .lock()
            .await
            .dispatch(&SyncNotification::BusyChanged { busy: true })
            .await;

        Ok(self.spawn_operation(direction, wallet, force_overwrite))
    }

    fn spawn_operation(
        &self,
        direction: SyncDirection,
        wallet: WalletHandle,
        force_overwrite: bool,
    ) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let dispatcher = Arc::clone(&self.dispatcher);
        let tracker = Arc::clone(&self.tracker);
        let busy = Arc::clone(&self.busy);

        tokio::spawn(async move {
            // The client call runs on its own task so that a panicking
            // implementation is caught here like any other failure
            let worker = {
                let client = Arc::clone(&client);
                let wallet = wallet.clone();
                tokio::spawn(async move {
                    match direction {
                        SyncDirection::Upload => client.push(&wallet).await,
                        SyncDirection::Download => client.pull(&wallet, force_overwrite).await,
                    }
                })
            };

            let result: Result<usize, String> = match worker.await {
                Ok(Ok(labels)) => Ok(labels),
                Ok(Err(e)) => Err(e.to_string()),
                Err(e) => Err(SyncError::TaskError(e.to_string()).to_string()),
            };

            let mut dispatcher = dispatcher.lock().await;
            match result {
                Ok(labels) => {
                    info!(
                        "Label {:?} finished for wallet {}: {}",
                        direction,
                        wallet.id,
                        format_label_count(labels)
                    );
                    {
                        let mut tracker = tracker.lock().unwrap();
                        match direction {
                            SyncDirection::Upload => tracker.record_upload(labels),
                            SyncDirection::Download => tracker.record_download(labels),
                        }
                    }
                    let (succeeded, message) = match direction {
                        SyncDirection::Upload => {
                            (SyncNotification::UploadSucceeded, "Labels uploaded")
                        }
                        SyncDirection::Download => {
                            (SyncNotification::DownloadSucceeded, "Labels downloaded")
                        }
                    };
                    dispatcher.dispatch(&succeeded).await;
                    dispatcher
                        .dispatch(&SyncNotification::UserNotify {
                            message: message.to_string(),
                        })
                        .await;
                }
                Err(reason) => {
                    error!(
                        "Label {:?} failed for wallet {}: {}",
                        direction, wallet.id, reason
                    );
                    {
                        let mut tracker = tracker.lock().unwrap();
                        match direction {
                            SyncDirection::Upload => tracker.record_upload_failure(&reason),
                            SyncDirection::Download => tracker.record_download_failure(&reason),
                        }
                    }
                    let failed = match direction {
                        SyncDirection::Upload => SyncNotification::UploadFailed {
                            reason: reason.clone(),
                        },
                        SyncDirection::Download => SyncNotification::DownloadFailed {
                            reason: reason.clone(),
                        },
                    };
                    dispatcher.dispatch(&failed).await;
                    dispatcher
                        .dispatch(&SyncNotification::UserNotify { message: reason })
                        .await;
                }
            }

            // Busy clears last, so observers never see an outcome while still idle
            busy.store(false, Ordering::SeqCst);
            dispatcher
                .dispatch(&SyncNotification::BusyChanged { busy: false })
                .await;
        })
    }
}
