//! Observable state containers.
//!
//! Every store owns its state exclusively and exposes it two ways that
//! always agree: a push stream of changes (subscribe) and a synchronous
//! snapshot. [`SyncStore`] adds in-place transformation and reset;
//! [`AsyncStore`] adds a coordinated single-task pipeline emitting
//! [`Async`](crate::value::Async) transitions.

mod async_store;
mod base;
mod sync;

pub use async_store::{AsyncStore, AsyncStoreConfig, RunOverrides};
pub use base::{Store, StoreId, Subscription};
pub use sync::SyncStore;
