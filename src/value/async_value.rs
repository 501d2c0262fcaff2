//! Asynchronous-result tagged union.

use std::sync::Arc;

/// Failure cause carried by [`Async::Error`].
///
/// Stored behind `Arc` so the union stays `Clone` while the underlying
/// cause remains an opaque `anyhow::Error` chain.
pub type TaskError = Arc<anyhow::Error>;

/// The result of an asynchronous operation, in exactly one of four
/// exclusive states.
///
/// Transitions are driven only by
/// [`AsyncStore::run`](crate::store::AsyncStore::run); consumers
/// receive `Async` values read-only. `Loading` carries no payload:
/// previously loaded data is not retained across a refetch.
#[derive(Debug, Clone, Default)]
pub enum Async<T> {
    /// No request ever issued, no data.
    #[default]
    Empty,
    /// A request is in flight.
    Loading,
    /// The last request failed.
    Error(TaskError),
    /// The most recent successful result.
    Data(T),
}

impl<T> Async<T> {
    /// Construct the never-requested state.
    pub fn empty() -> Self {
        Async::Empty
    }

    /// Construct the in-flight state.
    pub fn loading() -> Self {
        Async::Loading
    }

    /// Construct the failed state from a task failure.
    pub fn error(cause: anyhow::Error) -> Self {
        Async::Error(Arc::new(cause))
    }

    /// Construct the successful state.
    pub fn data(value: T) -> Self {
        Async::Data(value)
    }

    /// Whether the union holds data.
    pub fn has_data(&self) -> bool {
        matches!(self, Async::Data(_))
    }

    /// Whether the union is in the failed state.
    pub fn is_error(&self) -> bool {
        matches!(self, Async::Error(_))
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Async::Loading)
    }

    /// Whether no request was ever issued.
    pub fn is_empty(&self) -> bool {
        matches!(self, Async::Empty)
    }

    /// The state name, used in precondition messages and logs.
    pub fn status_name(&self) -> &'static str {
        match self {
            Async::Empty => "Empty",
            Async::Loading => "Loading",
            Async::Error(_) => "Error",
            Async::Data(_) => "Data",
        }
    }

    /// The contained data.
    ///
    /// # Panics
    /// Panics if the union is not `Data`. Use
    /// [`get_maybe`](Self::get_maybe) or
    /// [`get_or_else`](Self::get_or_else) for total access.
    pub fn get(&self) -> &T {
        match self {
            Async::Data(value) => value,
            other => panic!("expected Data but got {}", other.status_name()),
        }
    }

    /// The contained data, or `None` in any other state. Never panics.
    pub fn get_maybe(&self) -> Option<&T> {
        match self {
            Async::Data(value) => Some(value),
            _ => None,
        }
    }

    /// The failure cause.
    ///
    /// # Panics
    /// Panics if the union is not `Error`.
    pub fn get_error(&self) -> &TaskError {
        match self {
            Async::Error(cause) => cause,
            other => panic!("expected Error but got {}", other.status_name()),
        }
    }
}

impl<T: Clone> Async<T> {
    /// The contained data, or a lazily computed fallback. Never panics.
    pub fn get_or_else(&self, fallback: impl FnOnce() -> T) -> T {
        match self {
            Async::Data(value) => value.clone(),
            _ => fallback(),
        }
    }
}
