use std::collections::HashMap;

use lus_client::{AutoRenewRegistry, LusClient};
use lus_core::Service;
use tracing::info;

pub fn parse_keys(pairs: &[String]) -> anyhow::Result<HashMap<String, String>> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| anyhow::anyhow!("expected key=value, got '{pair}'"))
        })
        .collect()
}

pub async fn register(
    root: &str,
    keys: HashMap<String, String>,
    lease_ms: i64,
    data: String,
    auto_renew: bool,
    json: bool,
) -> anyhow::Result<()> {
    let client = LusClient::new(root);
    let service = Service::new(keys, lease_ms, data);
    let registration = client.register(service).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&registration)?);
    } else {
        println!("registered at {} (lease {}ms)", registration.url, registration.lease);
    }

    if auto_renew {
        let renewal = AutoRenewRegistry::new();
        renewal.start(client, registration.clone(), lease_ms).await;
        info!("auto-renewing {} every {}ms; Ctrl+C to stop", registration.url, registration.lease / 2);
        std::future::pending::<()>().await;
    }

    Ok(())
}

pub async fn find(root: &str, template: HashMap<String, String>, json: bool) -> anyhow::Result<()> {
    let client = LusClient::new(root);
    let services = client.find(template).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&services)?);
    } else if services.is_empty() {
        println!("no matching services");
    } else {
        println!("found {} service(s):", services.len());
        for service in services {
            println!("  {} (lease {}ms remaining) keys={:?}", service.id, service.lease, service.keys);
        }
    }

    Ok(())
}

pub async fn renew(root: &str, entry_url: &str, lease_ms: i64, json: bool) -> anyhow::Result<()> {
    let client = LusClient::new(root);
    let registration = client.renew(entry_url, lease_ms).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&registration)?);
    } else if registration.url.is_empty() {
        println!("no such entry");
    } else {
        println!("renewed {} (lease {}ms)", registration.url, registration.lease);
    }

    Ok(())
}

pub async fn get(root: &str, entry_url: &str, json: bool) -> anyhow::Result<()> {
    let client = LusClient::new(root);
    let services = client.get(entry_url).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&services)?);
    } else if services.is_empty() {
        println!("entry not found or expired");
    } else {
        println!("{:?}", services[0]);
    }

    Ok(())
}
