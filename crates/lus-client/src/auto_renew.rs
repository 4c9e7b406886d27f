use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};
use tokio::time::Duration;
use tracing::{debug, info, warn};

use lus_core::Registration;

use crate::client::LusClient;

/// Client-owned renewal map: `Registration → cancel signal`. A single
/// mutex around the map is the sanctioned discipline from the auto-renew
/// contract (the alternative — funnel bookkeeping through one
/// coordinator task — is more machinery for no extra safety here, since
/// `Halt` only ever needs to remove one key and fire one sender).
#[derive(Clone, Default)]
pub struct AutoRenewRegistry {
    tasks: Arc<Mutex<HashMap<String, oneshot::Sender<()>>>>,
}

impl AutoRenewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a background task that renews `registration` at half its
    /// currently granted lease, re-requesting `requested_lease_ms` each
    /// time, until halted or the registry reports the entry is gone.
    pub async fn start(&self, client: LusClient, registration: Registration, requested_lease_ms: i64) {
        let (cancel_tx, mut cancel_rx) = oneshot::channel();
        let url = registration.url.clone();

        {
            let mut tasks = self.tasks.lock().await;
            tasks.insert(url.clone(), cancel_tx);
        }

        let tasks = self.tasks.clone();
        let mut granted_lease_ms = registration.lease;

        tokio::spawn(async move {
            loop {
                if granted_lease_ms <= 0 {
                    debug!("auto-renew for {} stopping: granted lease reached zero", url);
                    break;
                }
                let sleep_ms = (granted_lease_ms / 2).max(1) as u64;

                tokio::select! {
                    _ = &mut cancel_rx => {
                        debug!("auto-renew for {} cancelled", url);
                        return;
                    }
                    _ = tokio::time::sleep(Duration::from_millis(sleep_ms)) => {}
                }

                match client.renew(&url, requested_lease_ms).await {
                    Ok(reg) if reg.lease > 0 => {
                        granted_lease_ms = reg.lease;
                    }
                    Ok(_) => {
                        info!("auto-renew for {} stopping: entry gone or capped to zero", url);
                        break;
                    }
                    Err(e) => {
                        warn!("auto-renew for {} failed: {e}", url);
                        break;
                    }
                }
            }

            // A task that exits on its own (not via cancellation) must
            // still remove itself so a later Halt is a harmless no-op.
            tasks.lock().await.remove(&url);
        });
    }

    /// Cancels the auto-renew task for `entry_url`, if any. Cancellation
    /// is honoured before the task's next network call or before its
    /// next sleep completes, whichever comes first.
    pub async fn halt(&self, entry_url: &str) {
        let sender = self.tasks.lock().await.remove(entry_url);
        if let Some(sender) = sender {
            let _ = sender.send(());
        }
    }

    pub async fn active_count(&self) -> usize {
        self.tasks.lock().await.len()
    }
}
