use std::collections::HashMap;
use tokio::time::Duration;
use tracing::error;

use lus_core::{LeasePolicy, Service};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Start a registry in-process.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let base_url = format!("http://{addr}");

    let handle = lus_registry::spawn(LeasePolicy::new(120_000));
    let app = lus_registry::router(lus_registry::AppState { registry: handle, base_url: base_url.clone() });
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("registry server error: {e}");
        }
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = lus_client::LusClient::new(format!("{base_url}/"));

    let mut keys = HashMap::new();
    keys.insert("application".to_string(), "minimal-demo".to_string());
    let registration = client.register(Service::new(keys.clone(), 10_000, "hello, lus!")).await?;
    println!("registered at {} (lease {}ms)", registration.url, registration.lease);

    let found = client.find(keys).await?;
    match found.first() {
        Some(service) => println!("found: {service:?}"),
        None => println!("no match found"),
    }

    Ok(())
}
