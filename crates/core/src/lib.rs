//! # ak-core
//!
//! Core data layer for agent-kit.
//!
//! This crate provides:
//! - A `Backend` abstraction over the admin API, with HTTP and mock implementations
//! - A keyed, coalescing collection cache
//! - Selection sets and multi-select render states for provider access forms
//! - The pinned-agents preference manager and the agents session context
//! - Configuration loading from the `.agent-kit/` directory
//!
//! ## Modules
//!
//! - [`backend`]: Data-access capability
//! - [`fetcher`]: Remote collection fetching
//! - [`catalog`]: Collections bound to configured endpoints
//! - [`selection`]: Selection set editing
//! - [`pinned`]: Pinned list management and background saves
//! - [`agents`]: Agent session state
//! - [`config`]: Configuration loading and management

pub mod agents;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod fetcher;
pub mod pinned;
pub mod selection;
