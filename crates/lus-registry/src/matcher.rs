use std::collections::HashMap;
use std::time::Instant;

use lus_core::Service;

use crate::store::EntryStore;

/// Filters the store by a template: every `(k, v)` in `template` must be
/// present in an entry's keys with an equal value, an absent key rejects
/// the entry, and an empty template matches everything. Surviving
/// entries are projected with `lease` set to the *remaining* lease at
/// `now`; entries whose remaining lease is not strictly positive are
/// dropped even though the periodic sweep has not yet removed them.
pub fn find_matches(
    template: &HashMap<String, String>,
    store: &EntryStore,
    now: Instant,
) -> Vec<Service> {
    store
        .values()
        .filter(|entry| matches_template(template, &entry.service.keys))
        .filter_map(|entry| {
            let remaining = entry.expiry.saturating_duration_since(now).as_millis() as i64;
            if remaining <= 0 {
                return None;
            }
            Some(Service {
                id: entry.service.id.clone(),
                lease: remaining,
                data: entry.service.data.clone(),
                keys: entry.service.keys.clone(),
            })
        })
        .collect()
}

fn matches_template(template: &HashMap<String, String>, keys: &HashMap<String, String>) -> bool {
    template.iter().all(|(k, v)| keys.get(k) == Some(v))
}
