//! # Pokestore
//!
//! Reactive state containers for the pokedex front-end.
//!
//! The crate is organized in three layers:
//!
//! - [`value`] - closed tagged unions ([`Maybe`], [`Async`]) with
//!   constructors, predicates, extraction helpers, and exhaustive
//!   dispatch for rendering.
//! - [`store`] - observable state containers. [`SyncStore`] offers
//!   synchronous in-place transformation; [`AsyncStore`] coordinates a
//!   single asynchronous operation per store with debouncing,
//!   deduplication, stale-time suppression, and supersede-on-new-call
//!   cancellation.
//! - [`services`] - domain stores (paginated pokemon list, favorites)
//!   built on the store primitives, wired together by [`AppServices`].
//!
//! Upstream HTTP access is abstracted behind the [`client::ApiClient`]
//! trait; the store layer never touches the network directly.

pub mod client;
pub mod services;
pub mod store;
pub mod value;

pub use client::{ApiClient, HttpApiClient};
pub use services::AppServices;
pub use store::{AsyncStore, AsyncStoreConfig, RunOverrides, Store, StoreId, SyncStore};
pub use value::{Async, Maybe, TaskError};
