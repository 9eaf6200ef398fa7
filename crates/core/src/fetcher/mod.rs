//! Remote collection fetching.
//!
//! This module provides the keyed `CollectionFetcher` cache and the
//! `FetchState` snapshot consumers render from.

pub mod cache;
pub mod state;

pub use cache::{CollectionFetcher, FetchHandle};
pub use state::{FetchError, FetchState};
