use std::collections::HashMap;
use std::time::Instant;

use lus_core::Service;

/// One leased registration: the descriptor as registered plus its
/// absolute expiry. Mutated only by the registry engine (`engine.rs`),
/// which is the store's sole owner — no internal locking required.
#[derive(Debug, Clone)]
pub struct EntryRecord {
    pub service: Service,
    pub expiry: Instant,
}

/// In-memory mapping from registry-assigned entry ID to leased entry.
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: HashMap<String, EntryRecord>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: String, service: Service, expiry: Instant) {
        self.entries.insert(id, EntryRecord { service, expiry });
    }

    pub fn get(&self, id: &str) -> Option<&EntryRecord> {
        self.entries.get(id)
    }

    /// Refreshes an entry's expiry in place, retaining the originally
    /// registered service descriptor (P6: renew never replaces `keys`/
    /// `data`/`id`, regardless of what the renew request body contains).
    pub fn renew(&mut self, id: &str, expiry: Instant) -> bool {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.expiry = expiry;
            true
        } else {
            false
        }
    }

    pub fn values(&self) -> impl Iterator<Item = &EntryRecord> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry whose expiry has passed as of `now`, using one
    /// snapshot instant so time does not advance mid-sweep.
    pub fn sweep(&mut self, now: Instant) {
        self.entries.retain(|_, entry| entry.expiry > now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn renew_preserves_service_but_moves_expiry() {
        let mut store = EntryStore::new();
        let now = Instant::now();
        let svc = Service::new(Default::default(), 1000, "payload");
        store.insert("id1".to_string(), svc.clone(), now + Duration::from_millis(1000));

        let new_expiry = now + Duration::from_millis(5000);
        assert!(store.renew("id1", new_expiry));

        let entry = store.get("id1").unwrap();
        assert_eq!(entry.service.data, "payload");
        assert_eq!(entry.expiry, new_expiry);
    }

    #[test]
    fn renew_unknown_id_is_noop() {
        let mut store = EntryStore::new();
        assert!(!store.renew("missing", Instant::now()));
    }

    #[test]
    fn sweep_removes_only_expired_entries() {
        let mut store = EntryStore::new();
        let now = Instant::now();
        store.insert("live".to_string(), Service::default(), now + Duration::from_secs(10));
        store.insert("dead".to_string(), Service::default(), now - Duration::from_secs(1));

        store.sweep(now);

        assert!(store.get("live").is_some());
        assert!(store.get("dead").is_none());
    }
}
