//! End-to-end tests for the pinned agents flow over the mock backend.
//!
//! These tests exercise the full path a front end takes:
//! bootstrap → render pinned view → toggle/reorder → background save →
//! refresh of the agents collection.

mod common;

use ak_core::backend::BackendError;
use ak_core::pinned::{ManagerState, PersistError, PinError, ScopeParams};
use ak_protocol::ipc::Event;
use common::*;
use serde_json::json;
use tokio::sync::mpsc::unbounded_channel;

fn ids(agents: &[ak_protocol::MinimalPersonaSnapshot]) -> Vec<i64> {
    agents.iter().map(|a| a.id).collect()
}

#[tokio::test]
async fn test_default_pins_for_new_user() {
    let backend = seeded_backend(None).await;
    let (_catalog, mut context) = context_for(&backend);

    context.bootstrap().await.expect("bootstrap failed");

    // Sentinel 0 is default but never pinned by derivation
    assert_eq!(context.pinned_agent_ids(), &[1, 2]);
    assert_eq!(ids(&context.pinned_agents().await), vec![1, 2]);
    assert!(backend.patches().await.is_empty(), "hydration must not save");
}

#[tokio::test]
async fn test_pin_by_unknown_id_saves_nothing() {
    let backend = seeded_backend(Some(vec![1])).await;
    let (_catalog, mut context) = context_for(&backend);
    context.bootstrap().await.expect("bootstrap failed");

    let err = context
        .toggle_pinned_agent_id(999, true)
        .await
        .expect_err("999 is not an agent");
    assert_eq!(err, PinError::UnknownEntity(999));
    assert_eq!(context.pinned_agent_ids(), &[1]);
    assert!(backend.patches().await.is_empty());
}

#[tokio::test]
async fn test_toggle_sequence_saves_each_order() {
    let backend = seeded_backend(Some(vec![3])).await;
    let (tx, mut rx) = unbounded_channel();
    let (_catalog, context) = context_for(&backend);
    let mut context = context.with_events(tx);
    context.bootstrap().await.expect("bootstrap failed");

    let agents = context.agents().await;
    let general = agents.iter().find(|a| a.id == 1).expect("agent 1").clone();

    let first = context
        .toggle_pinned_agent(&general, true)
        .expect("toggle failed")
        .expect("pin should change the list");
    // Pinning twice is a no-op and schedules nothing
    assert!(context
        .toggle_pinned_agent(&general, true)
        .expect("toggle failed")
        .is_none());
    let second = context
        .toggle_pinned_agent_id(3, false)
        .await
        .expect("toggle failed")
        .expect("unpin should change the list");

    first.wait().await.expect("first save failed");
    second.wait().await.expect("second save failed");

    assert_eq!(context.pinned_agent_ids(), &[1]);
    let bodies: Vec<_> = backend.patches().await.into_iter().map(|(_, b)| b).collect();
    assert_eq!(
        bodies,
        vec![json!({"ordered_ids": [3, 1]}), json!({"ordered_ids": [1]})]
    );

    let events = drain_events(&mut rx);
    assert_eq!(pinned_changes(&events), vec![vec![3, 1], vec![1]]);
    assert_all_pinned_persisted(&events, 2);
}

#[tokio::test]
async fn test_failed_save_is_a_notification_only() {
    let backend = seeded_backend(Some(vec![])).await;
    backend
        .set_patch_failure(Some(BackendError::Status {
            status: 503,
            message: "maintenance".to_string(),
        }))
        .await;
    let (tx, mut rx) = unbounded_channel();
    let (_catalog, context) = context_for(&backend);
    let mut context = context.with_events(tx);
    context.bootstrap().await.expect("bootstrap failed");
    assert!(context.pinned_agent_ids().is_empty());

    let task = context
        .set_pinned_agents(vec![9, 3, 9])
        .expect("set failed")
        .expect("order changed");
    let err = task.wait().await.unwrap_err();
    assert!(matches!(err, PersistError::PinnedOrder(BackendError::Status { status: 503, .. })));

    // No rollback
    assert_eq!(context.pinned_agent_ids(), &[9, 3]);
    assert_eq!(
        context.pinned_manager().state(),
        ManagerState::Hydrated,
        "failed save must not leave pending work"
    );
    assert!(has_pinned_persist_failure(&drain_events(&mut rx)));
}

#[tokio::test]
async fn test_refresh_keeps_pins_for_dropped_agents() {
    let backend = seeded_backend(Some(vec![9, 1])).await;
    let (_catalog, mut context) = context_for(&backend);
    context.bootstrap().await.expect("bootstrap failed");
    assert_eq!(ids(&context.pinned_agents().await), vec![9, 1]);

    backend
        .set_collection(
            "/persona",
            json!([{"id": 1, "name": "General", "is_default_persona": true}]),
        )
        .await;
    context.refresh_agents().await.expect("refresh failed");

    assert_eq!(context.pinned_agent_ids(), &[9, 1]);
    assert_eq!(ids(&context.pinned_agents().await), vec![1]);
    assert!(backend.patches().await.is_empty());
}

#[tokio::test]
async fn test_refresh_failure_keeps_stale_agents() {
    let backend = seeded_backend(None).await;
    let (catalog, mut context) = context_for(&backend);
    context.bootstrap().await.expect("bootstrap failed");

    backend
        .fail_next_fetch("/persona", BackendError::Request("connection reset".into()))
        .await;
    let err = context.refresh_agents().await.unwrap_err();
    assert_eq!(err.key, "/persona");

    let state = catalog.personas().state().await;
    assert!(!state.is_loading());
    assert!(state.error.is_some());
    assert_eq!(state.items().len(), 5);
    assert_eq!(context.agents().await.len(), 5);
}

#[tokio::test]
async fn test_current_agent_follows_collection() {
    let backend = seeded_backend(None).await;
    let (_catalog, mut context) = context_for(&backend);
    context.bootstrap().await.expect("bootstrap failed");

    let scope = ScopeParams::parse("?assistantId=9&chatSessionId=abc");
    assert_eq!(
        context.current_agent(&scope).await.map(|a| a.name),
        Some("Legacy Bot".to_string())
    );

    backend.set_collection("/persona", json!([])).await;
    context.refresh_agents().await.expect("refresh failed");
    assert!(context.current_agent(&scope).await.is_none());
}

#[tokio::test]
async fn test_events_report_collection_refresh() {
    let backend = seeded_backend(None).await;
    let (tx, mut rx) = unbounded_channel();
    let (catalog, _context) = context_for(&backend);
    let catalog = catalog.with_events(tx);

    catalog.user_groups().load().await;
    let events = drain_events(&mut rx);
    assert_eq!(
        events,
        vec![Event::CollectionRefreshed {
            key: "/manage/admin/user-group".to_string(),
            count: 2
        }]
    );
}
