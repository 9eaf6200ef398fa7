//! Backend abstraction.
//!
//! This module provides the `Backend` trait (the injected data-access
//! capability) with an HTTP implementation and an in-memory mock.

pub mod base;
pub mod http;
pub mod mock;

pub use base::{Backend, BackendError, CollectionKey};
pub use http::HttpBackend;
pub use mock::MockBackend;
