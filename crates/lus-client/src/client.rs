use std::collections::HashMap;
use std::time::Duration;

use lus_core::{LinkRelation, LusError, RenewRequest, Result, Service, REL_FIND, REL_REGISTER};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the LUS registry. Resolves the register/find URLs
/// from the HATEOAS root document by `Rel`, never by position — the
/// source client's positional lookup was a latent bug (see
/// `original_source/src/lus_client.go` and the HATEOAS ordering note in
/// the design notes) that this client does not reproduce.
#[derive(Clone)]
pub struct LusClient {
    http: reqwest::Client,
    root_url: String,
}

impl LusClient {
    pub fn new(root_url: impl Into<String>) -> Self {
        Self::with_timeout(root_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(root_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client builds with a timeout");
        Self { http, root_url: root_url.into() }
    }

    async fn discover(&self, rel: &str) -> Result<String> {
        let rels: Vec<LinkRelation> = self
            .http
            .get(&self.root_url)
            .send()
            .await
            .map_err(|e| LusError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| LusError::Transport(e.to_string()))?;

        rels.into_iter()
            .find(|r| r.rel == rel)
            .map(|r| r.href)
            .ok_or_else(|| LusError::Transport(format!("root document has no '{rel}' relation")))
    }

    pub async fn register(&self, service: Service) -> Result<lus_core::Registration> {
        let url = self.discover(REL_REGISTER).await?;
        self.http
            .post(&url)
            .json(&service)
            .send()
            .await
            .map_err(|e| LusError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| LusError::Transport(e.to_string()))
    }

    pub async fn find(&self, template: HashMap<String, String>) -> Result<Vec<Service>> {
        let url = self.discover(REL_FIND).await?;
        let body = Service { keys: template, ..Service::default() };
        self.http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LusError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| LusError::Transport(e.to_string()))
    }

    /// Renews a lease by PUTting to the entry URL. `requested_lease_ms
    /// == 0` is the sanctioned idiom for immediate removal.
    pub async fn renew(&self, entry_url: &str, requested_lease_ms: i64) -> Result<lus_core::Registration> {
        self.http
            .put(entry_url)
            .json(&RenewRequest { lease: requested_lease_ms })
            .send()
            .await
            .map_err(|e| LusError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| LusError::Transport(e.to_string()))
    }

    pub async fn get(&self, entry_url: &str) -> Result<Vec<Service>> {
        self.http
            .get(entry_url)
            .send()
            .await
            .map_err(|e| LusError::Transport(e.to_string()))?
            .json()
            .await
            .map_err(|e| LusError::Transport(e.to_string()))
    }
}
