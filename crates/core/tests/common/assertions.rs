//! Custom assertion helpers for integration tests.

use ak_protocol::ipc::Event;
use tokio::sync::mpsc::UnboundedReceiver;

/// Drain every event currently queued on `rx`.
#[allow(dead_code)]
pub fn drain_events(rx: &mut UnboundedReceiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// The `ordered_ids` of every `PinnedChanged` event, in order.
#[allow(dead_code)]
pub fn pinned_changes(events: &[Event]) -> Vec<Vec<i64>> {
    events
        .iter()
        .filter_map(|e| match e {
            Event::PinnedChanged { ordered_ids } => Some(ordered_ids.clone()),
            _ => None,
        })
        .collect()
}

/// Whether `events` contains a persist failure for the pinned order.
#[allow(dead_code)]
pub fn has_pinned_persist_failure(events: &[Event]) -> bool {
    events
        .iter()
        .any(|e| matches!(e, Event::PinnedPersistFailed { .. }))
}

/// Assert every pinned-order save reported success.
#[allow(dead_code)]
pub fn assert_all_pinned_persisted(events: &[Event], expected: usize) {
    let persisted = events
        .iter()
        .filter(|e| matches!(e, Event::PinnedPersisted { .. }))
        .count();
    assert_eq!(
        persisted, expected,
        "Expected {expected} PinnedPersisted events, got: {events:?}"
    );
    assert!(
        !has_pinned_persist_failure(events),
        "Unexpected persist failure in: {events:?}"
    );
}
