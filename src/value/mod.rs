//! Tagged-union value types and their helpers.
//!
//! [`Maybe`] models "value or absence"; [`Async`] models the four
//! exclusive states of an asynchronous operation's result. Both are
//! closed enums, so every consumer match is checked at compile time.
//! The render helpers dispatch exactly one handler per state.

mod async_value;
mod maybe;
mod render;

pub use async_value::{Async, TaskError};
pub use maybe::Maybe;
pub use render::{render_async_value, render_maybe_value, AsyncHandlers, MaybeHandlers};
