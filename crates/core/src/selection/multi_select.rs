//! Render-state derivation for multi-select fields.
//!
//! A multi-select shows exactly one of: a loading placeholder, an error
//! placeholder, an "empty collection" message, or the interactive editor.
//! `render_state` picks which, and precomputes the option and chip lists for
//! the interactive case.

use crate::fetcher::FetchState;
use crate::selection::set::{selected_view, unselected_view, SelectionSet};
use ak_protocol::Entity;

/// Static copy for one multi-select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelectSpec {
    pub label: String,
    pub subtext: Option<String>,
    pub empty_message: String,
}

impl MultiSelectSpec {
    pub fn new(label: impl Into<String>, empty_message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            subtext: None,
            empty_message: empty_message.into(),
        }
    }

    pub fn with_subtext(mut self, subtext: impl Into<String>) -> Self {
        self.subtext = Some(subtext.into());
        self
    }

    /// Agents allowed to use an LLM provider.
    pub fn personas() -> Self {
        Self::new(
            "Assistants",
            "No assistants available. Please create an assistant first from the Assistants page.",
        )
        .with_subtext(
            "Select which assistants can use this LLM provider. If none selected, all assistants can use it.",
        )
    }

    /// User groups allowed to access a resource.
    pub fn user_groups() -> Self {
        Self::new(
            "User Groups",
            "No user groups available. Please create a user group first.",
        )
        .with_subtext("Select which user groups can access this resource")
    }

    /// Inline message shown when the candidate fetch failed.
    pub fn error_message(&self) -> String {
        format!("Failed to load {}. Please try again.", self.label.to_lowercase())
    }
}

/// Whether the feature behind a field is available to this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureGate {
    /// Not known yet; treated like a pending fetch.
    Unknown,
    #[default]
    Enabled,
    /// Field is not rendered at all.
    Disabled,
}

impl From<bool> for FeatureGate {
    fn from(enabled: bool) -> Self {
        if enabled {
            FeatureGate::Enabled
        } else {
            FeatureGate::Disabled
        }
    }
}

/// What a multi-select field should display.
#[derive(Debug, PartialEq)]
pub enum MultiSelectView<'a, E> {
    Hidden,
    Loading {
        label: &'a str,
    },
    Error {
        label: &'a str,
        message: String,
    },
    Empty {
        label: &'a str,
        message: &'a str,
    },
    Interactive {
        label: &'a str,
        subtext: Option<&'a str>,
        /// Candidates still available to pick, in collection order.
        options: Vec<&'a E>,
        /// Selected candidates, in collection order.
        selected: Vec<&'a E>,
    },
}

impl<E> MultiSelectView<'_, E> {
    pub fn label(&self) -> Option<&str> {
        match self {
            MultiSelectView::Hidden => None,
            MultiSelectView::Loading { label }
            | MultiSelectView::Error { label, .. }
            | MultiSelectView::Empty { label, .. }
            | MultiSelectView::Interactive { label, .. } => Some(*label),
        }
    }
}

/// Derive the view for a field from its fetch state and current selection.
///
/// Priority: loading (fetch pending or gate unknown) > hidden (gate off) >
/// error > empty > interactive.
pub fn render_state<'a, E: Entity>(
    spec: &'a MultiSelectSpec,
    fetch: &'a FetchState<E>,
    selection: &SelectionSet,
    gate: FeatureGate,
) -> MultiSelectView<'a, E> {
    let label = spec.label.as_str();

    if fetch.is_loading() || gate == FeatureGate::Unknown {
        return MultiSelectView::Loading { label };
    }

    if gate == FeatureGate::Disabled {
        return MultiSelectView::Hidden;
    }

    if fetch.error.is_some() {
        return MultiSelectView::Error {
            label,
            message: spec.error_message(),
        };
    }

    let candidates = fetch.items();
    if candidates.is_empty() {
        return MultiSelectView::Empty {
            label,
            message: spec.empty_message.as_str(),
        };
    }

    MultiSelectView::Interactive {
        label,
        subtext: spec.subtext.as_deref(),
        options: unselected_view(candidates, selection),
        selected: selected_view(candidates, selection),
    }
}
