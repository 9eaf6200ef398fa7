//! Test fixtures for sample agents, seeded backends and config directories.

use ak_core::backend::{Backend, MockBackend};
use ak_core::catalog::Catalog;
use ak_core::agents::AgentsContext;
use ak_protocol::config_models::ClientConfig;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

/// Agents as listed by `/persona`: the sentinel, two defaults and two others.
#[allow(dead_code)]
pub fn sample_agents() -> Value {
    json!([
        {"id": 0, "name": "Search", "is_default_persona": true, "display_priority": 0},
        {"id": 1, "name": "General", "is_default_persona": true, "display_priority": 1},
        {"id": 2, "name": "Paraphrase", "is_default_persona": true, "display_priority": 2},
        {"id": 3, "name": "Release Notes", "description": "Summarises merged PRs"},
        {"id": 9, "name": "Legacy Bot"}
    ])
}

/// A mock backend serving `sample_agents` and a user with `pinned`.
#[allow(dead_code)]
pub async fn seeded_backend(pinned: Option<Vec<i64>>) -> MockBackend {
    let backend = MockBackend::new();
    backend.set_collection("/persona", sample_agents()).await;
    backend
        .set_collection(
            "/me",
            json!({"email": "admin@example.com", "preferences": {"pinned_assistants": pinned}}),
        )
        .await;
    backend
        .set_collection(
            "/manage/admin/user-group",
            json!([{"id": 10, "name": "Engineering"}, {"id": 11, "name": "Support"}]),
        )
        .await;
    backend
}

/// An `AgentsContext` over `backend` with default configuration.
#[allow(dead_code)]
pub fn context_for(backend: &MockBackend) -> (Catalog, AgentsContext) {
    let backend: Arc<dyn Backend> = Arc::new(backend.clone());
    let config = ClientConfig::default();
    let catalog = Catalog::new(Arc::clone(&backend), config.endpoints.clone());
    let context = AgentsContext::new(backend, &catalog, config);
    (catalog, context)
}

/// Create a temporary project directory with `.agent-kit/config.toml`.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project(config_toml: &str) -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let dir = temp_dir.path().join(".agent-kit");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("config.toml"), config_toml)?;
    Ok(temp_dir)
}
