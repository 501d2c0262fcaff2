//! Exhaustive per-state dispatch over the value unions.
//!
//! Rendering code supplies one handler per state and exactly one
//! handler runs. Because the unions are closed enums the `match` here
//! is the single place exhaustiveness is enforced; adding a state is a
//! compile error until every call site grows a handler.

use super::async_value::{Async, TaskError};
use super::maybe::Maybe;

/// One handler per [`Async`] state.
pub struct AsyncHandlers<E, L, F, D> {
    pub empty: E,
    pub loading: L,
    pub error: F,
    pub data: D,
}

/// Invoke the handler matching the current state of `value`.
pub fn render_async_value<T, R, E, L, F, D>(
    value: &Async<T>,
    handlers: AsyncHandlers<E, L, F, D>,
) -> R
where
    E: FnOnce() -> R,
    L: FnOnce() -> R,
    F: FnOnce(&TaskError) -> R,
    D: FnOnce(&T) -> R,
{
    match value {
        Async::Empty => (handlers.empty)(),
        Async::Loading => (handlers.loading)(),
        Async::Error(cause) => (handlers.error)(cause),
        Async::Data(data) => (handlers.data)(data),
    }
}

/// One handler per [`Maybe`] state.
pub struct MaybeHandlers<N, S> {
    pub none: N,
    pub some: S,
}

/// Invoke the handler matching the current state of `value`.
pub fn render_maybe_value<T, R, N, S>(value: &Maybe<T>, handlers: MaybeHandlers<N, S>) -> R
where
    N: FnOnce() -> R,
    S: FnOnce(&T) -> R,
{
    match value {
        Maybe::None => (handlers.none)(),
        Maybe::Some(value) => (handlers.some)(value),
    }
}
