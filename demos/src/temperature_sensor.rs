use std::collections::HashMap;
use tokio::time::{interval, Duration};
use tracing::{error, info};

use lus_client::{AutoRenewRegistry, LusClient};
use lus_core::{LeasePolicy, Service};

/// Registers a simulated temperature sensor with a short lease and keeps
/// it alive with auto-renew while a second task polls for it by
/// template, printing each live reading it finds.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let base_url = format!("http://{addr}");

    let handle = lus_registry::spawn_with_sweep_interval(LeasePolicy::new(120_000), Duration::from_millis(200));
    let app = lus_registry::router(lus_registry::AppState { registry: handle, base_url: base_url.clone() });
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("registry server error: {e}");
        }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = LusClient::new(format!("{base_url}/"));

    let mut keys = HashMap::new();
    keys.insert("kind".to_string(), "sensor".to_string());
    keys.insert("room".to_string(), "A".to_string());

    let lease_ms = 1_500;
    let registration = client
        .register(Service::new(keys.clone(), lease_ms, "20.0"))
        .await?;
    info!("sensor registered at {} (lease {}ms)", registration.url, registration.lease);

    let auto_renew = AutoRenewRegistry::new();
    auto_renew.start(client.clone(), registration.clone(), lease_ms).await;

    let poller = tokio::spawn(async move {
        let mut ticks = interval(Duration::from_millis(500));
        for _ in 0..6 {
            ticks.tick().await;
            match client.find(keys.clone()).await {
                Ok(found) if !found.is_empty() => {
                    info!("poller: found sensor with {}ms remaining", found[0].lease);
                }
                Ok(_) => info!("poller: sensor not found"),
                Err(e) => error!("poller: find failed: {e}"),
            }
        }
    });

    poller.await?;

    auto_renew.halt(&registration.url).await;
    info!("auto-renew halted; sensor entry will expire on its own");

    Ok(())
}
