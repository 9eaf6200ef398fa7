//! TUI widgets module.
//!
//! This module contains the widgets for the agents screen.

pub mod agent_list;
pub mod multi_select;
pub mod pinned_bar;

pub use agent_list::render_agent_list;
pub use multi_select::render_multi_select;
pub use pinned_bar::render_pinned_bar;
