//! Selection set editing.
//!
//! This module provides:
//! - `SelectionSet` with its select/remove operations and derived views
//! - Multi-select render-state derivation
//! - Form state built from selection-set fields

pub mod form;
pub mod multi_select;
pub mod set;

pub use form::{AccessField, LlmProviderAccessForm};
pub use multi_select::{render_state, FeatureGate, MultiSelectSpec, MultiSelectView};
pub use set::{selected_view, unselected_view, SelectionSet};
