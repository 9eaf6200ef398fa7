//! Agent session state.
//!
//! This module provides the `AgentsContext`, which owns the pinned agents,
//! the focused agent and per-agent preferences for one user session.

pub mod context;

pub use context::{AgentsContext, AgentsError};
