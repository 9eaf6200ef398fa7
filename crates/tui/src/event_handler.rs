//! Event handling utilities for the TUI.
//!
//! This module provides functions for handling different types of events:
//! - Keyboard events, mapped to a `KeyAction` for the focused pane
//! - Core events, turned into status-line messages

use crate::event::{KeyAction, Pane};
use ak_protocol::ipc::Event;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key press to an action for the focused pane.
pub fn map_key_event(key_event: KeyEvent, pane: Pane) -> KeyAction {
    if key_event.kind != KeyEventKind::Press {
        return KeyAction::Ignored;
    }
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return KeyAction::Quit;
    }

    match (key_event.code, pane) {
        (KeyCode::Char('q'), _) => KeyAction::Quit,
        (KeyCode::Up, _) => KeyAction::MoveUp,
        (KeyCode::Down, _) => KeyAction::MoveDown,
        (KeyCode::Char('r'), _) => KeyAction::Refresh,
        (KeyCode::Tab, _) => KeyAction::SwitchPane,
        (KeyCode::Char(' '), Pane::Agents) => KeyAction::TogglePin,
        (KeyCode::Left | KeyCode::Right, Pane::Access) => KeyAction::SwitchField,
        (KeyCode::Enter, Pane::Access) => KeyAction::SelectOption,
        (KeyCode::Backspace, Pane::Access) => KeyAction::RemoveLast,
        _ => KeyAction::Ignored,
    }
}

/// Status-line text for an event from the core, if it is worth showing.
pub fn describe_core_event(event: &Event) -> Option<String> {
    match event {
        Event::CollectionRefreshed { .. } => None,
        Event::CollectionFetchFailed { error, .. } => Some(error.clone()),
        Event::PinnedChanged { .. } => Some("Saving pinned agents...".to_string()),
        Event::PinnedPersisted { ordered_ids, .. } => {
            Some(format!("Saved {} pinned agents", ordered_ids.len()))
        }
        Event::PinnedPersistFailed { error, .. } => Some(error.clone()),
        Event::PreferencePersistFailed { error, .. } => Some(error.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('q')), Pane::Access),
            KeyAction::Quit
        );
        assert_eq!(
            map_key_event(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                Pane::Agents
            ),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_space_pins_only_in_agents_pane() {
        let space = KeyEvent::from(KeyCode::Char(' '));
        assert_eq!(map_key_event(space, Pane::Agents), KeyAction::TogglePin);
        assert_eq!(map_key_event(space, Pane::Access), KeyAction::Ignored);
    }

    #[test]
    fn test_access_pane_editing_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Enter), Pane::Access),
            KeyAction::SelectOption
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Backspace), Pane::Access),
            KeyAction::RemoveLast
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Right), Pane::Access),
            KeyAction::SwitchField
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Enter), Pane::Agents),
            KeyAction::Ignored
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut key = KeyEvent::from(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key_event(key, Pane::Agents), KeyAction::Ignored);
    }

    #[test]
    fn test_describe_core_event() {
        assert_eq!(
            describe_core_event(&Event::CollectionRefreshed {
                key: "/persona".to_string(),
                count: 3
            }),
            None
        );
        assert_eq!(
            describe_core_event(&Event::PinnedPersisted {
                task_id: Uuid::new_v4(),
                ordered_ids: vec![1, 2],
            }),
            Some("Saved 2 pinned agents".to_string())
        );
        assert_eq!(
            describe_core_event(&Event::PinnedPersistFailed {
                task_id: Uuid::new_v4(),
                error: "Failed to save pinned order: offline".to_string(),
            }),
            Some("Failed to save pinned order: offline".to_string())
        );
    }
}
