//! # ak-protocol
//!
//! Core protocol definitions and data models for agent-kit.
//!
//! This crate defines all shared data structures used for:
//! - Entities listed by the backend (agents, user groups, LLM providers)
//! - User preference payloads (pinned order, per-agent settings)
//! - Client configuration parsing (`.agent-kit/config.toml`)
//! - Notifications emitted by the core to front ends
//!
//! ## Modules
//!
//! - [`entity_models`]: The `Entity` trait and `GenericItem`
//! - [`agent_models`]: Agent (persona) snapshots
//! - [`provider_models`]: LLM providers and user groups
//! - [`preference_models`]: Pinned order and per-agent preferences
//! - [`config_models`]: Client configuration
//! - [`ipc`]: Events sent from the core to the UI
//!
//! ## Design Principles
//!
//! - Minimal dependencies: Only serde, ts-rs and uuid
//! - TypeScript generation: All types derive `TS` for client compatibility
//! - Independent compilation: No dependencies on other agent-kit crates

pub mod agent_models;
pub mod config_models;
pub mod entity_models;
pub mod ipc;
pub mod preference_models;
pub mod provider_models;

// Re-export all public types for convenience
pub use agent_models::*;
pub use config_models::*;
pub use entity_models::*;
pub use ipc::*;
pub use preference_models::*;
pub use provider_models::*;
