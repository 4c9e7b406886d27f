use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};

use lus_core::{LinkRelation, RenewRequest, Service, REL_FIND, REL_REGISTER};

use crate::engine::RegistryHandle;

#[derive(Clone)]
pub struct AppState {
    pub registry: RegistryHandle,
    pub base_url: String,
}

/// Builds the HTTP/JSON binding over the registry engine. The engine
/// itself knows nothing about HTTP; this router is the transport façade
/// spec.md treats as an external collaborator.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/register", post(register))
        .route("/find", post(find))
        .route("/entry/:id", get(get_entry).put(renew_entry))
        .with_state(state)
}

async fn root(State(state): State<AppState>) -> Json<Vec<LinkRelation>> {
    Json(vec![
        LinkRelation { rel: REL_REGISTER.to_string(), href: format!("{}/register", state.base_url) },
        LinkRelation { rel: REL_FIND.to_string(), href: format!("{}/find", state.base_url) },
    ])
}

async fn register(State(state): State<AppState>, Json(service): Json<Service>) -> Json<lus_core::Registration> {
    let mut reg = state.registry.register(service).await;
    reg.url = format!("{}{}", state.base_url, reg.url);
    Json(reg)
}

async fn find(State(state): State<AppState>, Json(template): Json<Service>) -> Json<Vec<Service>> {
    Json(state.registry.find(template.keys).await)
}

async fn get_entry(State(state): State<AppState>, Path(id): Path<String>) -> Json<Vec<Service>> {
    Json(state.registry.get(id).await)
}

async fn renew_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RenewRequest>,
) -> Json<lus_core::Registration> {
    let mut reg = state.registry.renew(id, body.lease).await;
    if !reg.url.is_empty() {
        reg.url = format!("{}{}", state.base_url, reg.url);
    }
    Json(reg)
}
