use std::collections::HashMap;
use std::time::Duration;

use lus::client::{AutoRenewRegistry, LusClient};
use lus::core::{LeasePolicy, Service};
use lus::registry::{self, AppState};

async fn spawn_registry(max_lease_ms: i64, sweep_interval: Duration) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{addr}");

    let handle = registry::spawn_with_sweep_interval(LeasePolicy::new(max_lease_ms), sweep_interval);
    let app = registry::router(AppState { registry: handle, base_url: base_url.clone() });

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    // let the listener start accepting before the first request lands.
    tokio::time::sleep(Duration::from_millis(20)).await;

    format!("{base_url}/")
}

fn keys(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[tokio::test]
async fn discover_empty_registry_returns_no_matches() {
    let root = spawn_registry(120_000, Duration::from_secs(1)).await;
    let client = LusClient::new(root);

    let found = client.find(keys(&[("application", "poller")])).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn register_and_find_by_partial_template() {
    let root = spawn_registry(120_000, Duration::from_secs(1)).await;
    let client = LusClient::new(root);

    let mut service_b = Service::new(keys(&[("application", "poller"), ("environment", "prod"), ("id", "b")]), 10_000, "");
    service_b.id = "b123".to_string();
    let reg_b = client.register(service_b).await.unwrap();
    assert_eq!(reg_b.lease, 10_000);

    client
        .register(Service::new(keys(&[("application", "poller"), ("environment", "dev"), ("id", "c")]), 10_000, ""))
        .await
        .unwrap();

    let all_pollers = client.find(keys(&[("application", "poller")])).await.unwrap();
    assert_eq!(all_pollers.len(), 2);

    let prod_only = client.find(keys(&[("application", "poller"), ("environment", "prod")])).await.unwrap();
    assert_eq!(prod_only.len(), 1);
    assert_eq!(prod_only[0].keys.get("id").map(String::as_str), Some("b"));
    // The provider-chosen `id` ("b123") must come back verbatim, distinct
    // from both the `keys` map and the registry-minted entry-URL handle.
    assert_eq!(prod_only[0].id, "b123");
    assert!(!reg_b.url.contains("b123"));
}

#[tokio::test]
async fn requested_lease_above_cap_is_clamped() {
    let root = spawn_registry(120_000, Duration::from_secs(1)).await;
    let client = LusClient::new(root);

    let reg = client
        .register(Service::new(keys(&[("application", "some_other_app")]), 99_999_999_999, ""))
        .await
        .unwrap();
    assert_eq!(reg.lease, 120_000);
}

#[tokio::test]
async fn zero_lease_renew_removes_the_entry() {
    let root = spawn_registry(120_000, Duration::from_millis(50)).await;
    let client = LusClient::new(root);

    let reg = client
        .register(Service::new(keys(&[("application", "poller")]), 10_000, ""))
        .await
        .unwrap();

    client.renew(&reg.url, 0).await.unwrap();

    let found = client.find(keys(&[("application", "poller")])).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn get_on_an_expired_entry_returns_empty() {
    let root = spawn_registry(120_000, Duration::from_secs(3600)).await;
    let client = LusClient::new(root);

    let reg = client.register(Service::new(keys(&[]), 200, "")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(400)).await;

    let found = client.get(&reg.url).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn auto_renew_keeps_entry_alive_until_halted() {
    let root = spawn_registry(120_000, Duration::from_millis(50)).await;
    let client = LusClient::new(root);

    let reg = client
        .register(Service::new(keys(&[("application", "poller")]), 1_000, ""))
        .await
        .unwrap();

    let auto_renew = AutoRenewRegistry::new();
    auto_renew.start(client.clone(), reg.clone(), 1_000).await;

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    let found = client.find(keys(&[("application", "poller")])).await.unwrap();
    assert_eq!(found.len(), 1, "entry should survive past its original lease thanks to auto-renew");

    auto_renew.halt(&reg.url).await;

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    let found = client.find(keys(&[("application", "poller")])).await.unwrap();
    assert!(found.is_empty(), "entry should expire once auto-renew is halted");
}
