use std::collections::HashMap;
use std::time::{Duration, Instant};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sha1::{Digest, Sha1};
use tokio::sync::{mpsc, oneshot};
use tokio::time::interval;
use tracing::{debug, info};

use lus_core::{LeasePolicy, Registration, Service};

use crate::matcher::find_matches;
use crate::store::EntryStore;

const ID_SALT: &[u8] = b"lus-registry-entry-id-salt";
const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// One typed request shape per engine operation, each carrying its own
/// reply channel. Replaces the teacher's single overloaded request
/// struct with a tagged enum per spec.md's redesign note (a re-
/// implementation should use one variant per request kind).
pub enum EngineRequest {
    Register {
        service: Service,
        reply: oneshot::Sender<Registration>,
    },
    Renew {
        id: String,
        requested_lease_ms: i64,
        reply: oneshot::Sender<Registration>,
    },
    Get {
        id: String,
        reply: oneshot::Sender<Vec<Service>>,
    },
    Find {
        template: HashMap<String, String>,
        reply: oneshot::Sender<Vec<Service>>,
    },
}

/// Clone-able front door onto the single-writer registry engine. Every
/// call is a rendezvous: enqueue a request, await its private reply.
#[derive(Clone)]
pub struct RegistryHandle {
    sender: mpsc::Sender<EngineRequest>,
}

impl RegistryHandle {
    pub async fn register(&self, service: Service) -> Registration {
        let (reply, rx) = oneshot::channel();
        let _ = self.sender.send(EngineRequest::Register { service, reply }).await;
        rx.await.unwrap_or_default()
    }

    pub async fn renew(&self, id: String, requested_lease_ms: i64) -> Registration {
        let (reply, rx) = oneshot::channel();
        let _ = self
            .sender
            .send(EngineRequest::Renew { id, requested_lease_ms, reply })
            .await;
        rx.await.unwrap_or_default()
    }

    pub async fn get(&self, id: String) -> Vec<Service> {
        let (reply, rx) = oneshot::channel();
        let _ = self.sender.send(EngineRequest::Get { id, reply }).await;
        rx.await.unwrap_or_default()
    }

    pub async fn find(&self, template: HashMap<String, String>) -> Vec<Service> {
        let (reply, rx) = oneshot::channel();
        let _ = self.sender.send(EngineRequest::Find { template, reply }).await;
        rx.await.unwrap_or_default()
    }
}

/// Spawns the registry engine task and returns a handle to it. The
/// returned task runs until every `RegistryHandle` clone is dropped and
/// the request channel closes.
pub fn spawn(policy: LeasePolicy) -> RegistryHandle {
    spawn_with_sweep_interval(policy, DEFAULT_SWEEP_INTERVAL)
}

pub fn spawn_with_sweep_interval(policy: LeasePolicy, sweep_interval: Duration) -> RegistryHandle {
    let (sender, receiver) = mpsc::channel(256);
    tokio::spawn(run(receiver, policy, sweep_interval));
    RegistryHandle { sender }
}

async fn run(mut receiver: mpsc::Receiver<EngineRequest>, policy: LeasePolicy, sweep_interval: Duration) {
    let mut store = EntryStore::new();
    let mut counter: u64 = 0;
    let mut tick = interval(sweep_interval);
    // The first tick fires immediately; consume it so the sweep cadence
    // starts one full interval out, matching a periodic timer semantics.
    tick.tick().await;

    loop {
        tokio::select! {
            maybe_req = receiver.recv() => {
                match maybe_req {
                    Some(req) => dispatch(req, &mut store, &policy, &mut counter),
                    None => break,
                }
            }
            _ = tick.tick() => {
                let now = Instant::now();
                let before = store.len();
                store.sweep(now);
                let after = store.len();
                if before != after {
                    info!("swept {} expired entries ({} remain)", before - after, after);
                }
            }
        }
    }
}

fn dispatch(req: EngineRequest, store: &mut EntryStore, policy: &LeasePolicy, counter: &mut u64) {
    match req {
        EngineRequest::Register { service, reply } => {
            let now = Instant::now();
            let (expiry, granted) = policy.grant(service.lease, now);
            let id = mint_id(*counter);
            *counter += 1;
            debug!("registered entry {}", id);
            store.insert(id.clone(), service, expiry);
            let _ = reply.send(Registration { url: entry_path(&id), lease: granted });
        }
        EngineRequest::Renew { id, requested_lease_ms, reply } => {
            let now = Instant::now();
            let (expiry, granted) = policy.grant(requested_lease_ms, now);
            if store.renew(&id, expiry) {
                debug!("renewed entry {} for {}ms", id, granted);
                let _ = reply.send(Registration { url: entry_path(&id), lease: granted });
            } else {
                let _ = reply.send(Registration::default());
            }
        }
        EngineRequest::Get { id, reply } => {
            let now = Instant::now();
            let matches = match store.get(&id) {
                Some(entry) => {
                    let remaining = entry.expiry.saturating_duration_since(now).as_millis() as i64;
                    if remaining > 0 {
                        vec![Service { lease: remaining, ..entry.service.clone() }]
                    } else {
                        vec![]
                    }
                }
                None => vec![],
            };
            let _ = reply.send(matches);
        }
        EngineRequest::Find { template, reply } => {
            let now = Instant::now();
            let matches = find_matches(&template, store, now);
            let _ = reply.send(matches);
        }
    }
}

/// Mints an opaque, URL-safe, collision-resistant handle from the
/// monotonic counter: salt the counter's decimal text, SHA-1 digest it,
/// base64url-encode with no padding. Not a security token — only an
/// opaque handle that never repeats across the process lifetime.
fn mint_id(counter: u64) -> String {
    let mut hasher = Sha1::new();
    hasher.update(ID_SALT);
    hasher.update(counter.to_string().as_bytes());
    let digest = hasher.finalize();
    URL_SAFE_NO_PAD.encode(digest)
}

pub fn entry_path(id: &str) -> String {
    format!("/entry/{id}")
}
