use std::collections::HashMap;
use tokio::time::Duration;
use tracing::{error, info};

use lus_client::LusClient;
use lus_core::{LeasePolicy, Service};

/// Demonstrates the two ways an entry disappears: a zero-lease renew
/// (immediate, the sanctioned "unregister now" idiom) and a lease simply
/// running out with nobody renewing it.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let base_url = format!("http://{addr}");

    let handle = lus_registry::spawn_with_sweep_interval(LeasePolicy::new(120_000), Duration::from_millis(100));
    let app = lus_registry::router(lus_registry::AppState { registry: handle, base_url: base_url.clone() });
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("registry server error: {e}");
        }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = LusClient::new(format!("{base_url}/"));

    let mut keys = HashMap::new();
    keys.insert("application".to_string(), "batch-job".to_string());
    let registration = client.register(Service::new(keys.clone(), 60_000, "")).await?;
    info!("registered {} with a 60s lease", registration.url);

    client.renew(&registration.url, 0).await?;
    let found = client.find(keys.clone()).await?;
    info!("after zero-lease renew: {} match(es)", found.len());
    assert!(found.is_empty());

    let mut short_keys = HashMap::new();
    short_keys.insert("application".to_string(), "one-shot".to_string());
    client.register(Service::new(short_keys.clone(), 250, "")).await?;
    info!("registered a second entry with a 250ms lease and no auto-renew");

    tokio::time::sleep(Duration::from_millis(500)).await;
    let found = client.find(short_keys).await?;
    info!("after its lease lapsed: {} match(es)", found.len());
    assert!(found.is_empty());

    Ok(())
}
