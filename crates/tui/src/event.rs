//! Event handling types for the TUI.
//!
//! Key presses are first mapped to a `KeyAction` for the focused `Pane`,
//! then applied to the app state.

/// Which half of the screen has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Agents,
    Access,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Agents => Pane::Access,
            Pane::Access => Pane::Agents,
        }
    }
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    MoveUp,
    MoveDown,
    /// Pin the highlighted agent, or unpin it if already pinned.
    TogglePin,
    Refresh,
    SwitchPane,
    /// Move focus between the multi-select fields of the access pane.
    SwitchField,
    /// Add the highlighted option to the focused field.
    SelectOption,
    /// Remove the last chip of the focused field.
    RemoveLast,
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pane_next_cycles() {
        assert_eq!(Pane::default(), Pane::Agents);
        assert_eq!(Pane::Agents.next(), Pane::Access);
        assert_eq!(Pane::Access.next(), Pane::Agents);
    }
}
