//! Round trip against an in-process HTTP server.
//!
//! Verifies the wire contract of `HttpBackend`: scoped `GET` query strings,
//! bearer authentication, the pinned-order `PATCH` body and status errors.

mod common;

use ak_core::agents::AgentsContext;
use ak_core::backend::{Backend, BackendError, HttpBackend};
use ak_core::catalog::Catalog;
use ak_protocol::config_models::{ClientConfig, ServerConfig};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch};
use axum::{Json, Router};
use common::sample_agents;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct Recorded {
    pinned_bodies: Arc<Mutex<Vec<Value>>>,
    auth_headers: Arc<Mutex<Vec<String>>>,
}

async fn personas(State(recorded): State<Recorded>, headers: HeaderMap) -> Json<Value> {
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        recorded.auth_headers.lock().await.push(auth.to_string());
    }
    Json(sample_agents())
}

async fn current_user() -> Json<Value> {
    Json(json!({"id": "u-1", "preferences": {"pinned_assistants": [3]}}))
}

async fn providers(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let public = json!({"id": 1, "name": "Public", "provider": "openai", "default_model_name": "gpt-4o", "is_public": true});
    let restricted = json!({"id": 2, "name": "Restricted", "provider": "anthropic", "default_model_name": "claude-sonnet", "personas": [3]});
    match params.get("persona_id").map(String::as_str) {
        Some("3") => Json(json!([public, restricted])),
        _ => Json(json!([public])),
    }
}

async fn user_groups() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable")
}

async fn save_pinned(State(recorded): State<Recorded>, Json(body): Json<Value>) -> StatusCode {
    recorded.pinned_bodies.lock().await.push(body);
    StatusCode::NO_CONTENT
}

async fn serve(recorded: Recorded) -> String {
    let app = Router::new()
        .route("/api/persona", get(personas))
        .route("/api/me", get(current_user))
        .route("/api/llm/provider", get(providers))
        .route("/api/manage/admin/user-group", get(user_groups))
        .route("/api/user/pinned-items", patch(save_pinned))
        .with_state(recorded);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/api/")
}

fn server_config(base_url: String) -> ServerConfig {
    ServerConfig {
        base_url,
        api_key: Some("test-token".to_string()),
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn test_pin_roundtrip_over_http() {
    let recorded = Recorded::default();
    let base_url = serve(recorded.clone()).await;

    let mut config = ClientConfig::default();
    config.server = server_config(base_url);
    let backend: Arc<dyn Backend> =
        Arc::new(HttpBackend::from_config(&config.server).expect("Failed to build backend"));
    let catalog = Catalog::new(Arc::clone(&backend), config.endpoints.clone());
    let mut context = AgentsContext::new(backend, &catalog, config);

    context.bootstrap().await.expect("bootstrap failed");
    assert_eq!(context.agents().await.len(), 5);
    assert_eq!(context.pinned_agent_ids(), &[3]);

    context
        .toggle_pinned_agent_id(1, true)
        .await
        .expect("toggle failed")
        .expect("list changed")
        .wait()
        .await
        .expect("save failed");

    assert_eq!(
        *recorded.pinned_bodies.lock().await,
        vec![json!({"ordered_ids": [3, 1]})]
    );
    assert_eq!(
        *recorded.auth_headers.lock().await,
        vec!["Bearer test-token".to_string()]
    );
}

#[tokio::test]
async fn test_scoped_provider_query() {
    let base_url = serve(Recorded::default()).await;
    let backend: Arc<dyn Backend> = Arc::new(
        HttpBackend::from_config(&server_config(base_url)).expect("Failed to build backend"),
    );
    let catalog = Catalog::new(backend, Default::default());

    let all = catalog.llm_providers(None).load().await;
    let scoped = catalog.llm_providers(Some(3)).load().await;

    assert_eq!(all.items().len(), 1);
    assert_eq!(scoped.items().len(), 2);
    assert_eq!(scoped.items()[1].personas, vec![3]);
}

#[tokio::test]
async fn test_status_error_surfaces_in_fetch_state() {
    let base_url = serve(Recorded::default()).await;
    let backend: Arc<dyn Backend> = Arc::new(
        HttpBackend::from_config(&server_config(base_url)).expect("Failed to build backend"),
    );
    let catalog = Catalog::new(backend, Default::default());

    let state = catalog.user_groups().load().await;
    assert!(!state.is_loading());
    let error = state.error.expect("expected fetch error");
    assert_eq!(
        error.source,
        BackendError::Status {
            status: 500,
            message: "database unavailable".to_string()
        }
    );
}
