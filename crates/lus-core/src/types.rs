use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known link relations advertised by the HATEOAS root document.
/// Carried verbatim from the service this crate reimplements so that an
/// existing client resolving by `Rel` keeps working unmodified.
pub const REL_REGISTER: &str = "http://rels.ewansilver.com/v1/lus/register";
pub const REL_FIND: &str = "http://rels.ewansilver.com/v1/lus/find";

/// A service descriptor: the bag of key/value pairs a provider announces
/// itself with (on register), or the template a consumer searches with
/// (on find, where only `keys` is meaningful).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Service {
    #[serde(rename = "ID", default)]
    pub id: String,
    /// Requested lease on register/renew; granted/remaining lease in replies.
    #[serde(rename = "Lease", default)]
    pub lease: i64,
    #[serde(rename = "Data", default)]
    pub data: String,
    #[serde(rename = "Keys", default)]
    pub keys: HashMap<String, String>,
}

impl Service {
    pub fn new(keys: HashMap<String, String>, lease: i64, data: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            lease,
            data: data.into(),
            keys,
        }
    }
}

/// Reply to register/renew: the absolute URL of the entry plus the
/// lease actually granted, in milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Registration {
    #[serde(rename = "Url", default)]
    pub url: String,
    #[serde(rename = "Lease", default)]
    pub lease: i64,
}

/// One entry in the HATEOAS root document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkRelation {
    #[serde(rename = "Rel")]
    pub rel: String,
    #[serde(rename = "Href")]
    pub href: String,
}

/// Body of a PUT to an entry URL: the requested lease for a renewal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenewRequest {
    #[serde(rename = "Lease", default)]
    pub lease: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_round_trips_through_json() {
        let mut keys = HashMap::new();
        keys.insert("application".to_string(), "poller".to_string());
        let svc = Service {
            id: "abc123".to_string(),
            lease: 10_000,
            data: "payload".to_string(),
            keys,
        };
        let json = serde_json::to_string(&svc).unwrap();
        let back: Service = serde_json::from_str(&json).unwrap();
        assert_eq!(svc, back);
    }

    #[test]
    fn service_wire_field_names_match_original() {
        let svc = Service::new(HashMap::new(), 5000, "");
        let json = serde_json::to_value(&svc).unwrap();
        assert!(json.get("ID").is_some());
        assert!(json.get("Lease").is_some());
        assert!(json.get("Data").is_some());
        assert!(json.get("Keys").is_some());
    }

    #[test]
    fn registration_defaults_are_empty_url_zero_lease() {
        let reg = Registration::default();
        assert_eq!(reg.url, "");
        assert_eq!(reg.lease, 0);
    }
}
