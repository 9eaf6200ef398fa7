//! Pinned-items preference management.
//!
//! This module provides:
//! - `PinnedList`, the ordered and deduplicated pin order
//! - `PinnedManager`, which mutates it optimistically and saves in the background
//! - `PersistTask` handles for those saves
//! - `ScopeParams` for resolving the focused entity

pub mod focus;
pub mod list;
pub mod manager;
pub mod persist;

pub use focus::ScopeParams;
pub use list::PinnedList;
pub use manager::{ManagerState, PinError, PinnedManager};
pub use persist::{PendingCounter, PersistError, PersistTask};
