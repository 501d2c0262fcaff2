//! Coordinated single-task asynchronous store.
//!
//! Each store manages one conceptual "currently relevant" asynchronous
//! operation. `run` is the only mutation entry point; it emits
//! [`Async`] transitions on the base store's push stream while a small
//! internal machine (`Idle -> Debouncing -> InFlight -> Idle`) handles
//! debouncing, deduplication, stale-time suppression, and
//! supersede-on-new-call cancellation.
//!
//! Cancellation is cooperative: each accepted call bumps a sequence
//! number, and the spawned pipeline re-checks it after the debounce
//! delay and again after the task settles. A superseded pipeline simply
//! returns without committing; the underlying future is never aborted.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::base::{StateCell, Store, StoreId, Subscription};
use crate::value::Async;

/// Per-store defaults for [`AsyncStore::run`].
#[derive(Debug, Clone, Copy)]
pub struct AsyncStoreConfig {
    /// Within this window after a success, new `run` calls are no-ops
    /// and the existing `Data` is left standing. Zero disables the
    /// check.
    pub stale_time: Duration,
    /// Delay between accepting a call and invoking its task. Calls
    /// arriving inside the window supersede the pending one
    /// (trailing debounce).
    pub debounce_time: Duration,
    /// Suppress a `run` call while a task is already past the debounce
    /// delay and awaiting completion.
    pub deduplicate: bool,
}

impl Default for AsyncStoreConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::ZERO,
            debounce_time: Duration::from_millis(300),
            deduplicate: true,
        }
    }
}

/// Per-call overrides; `None` fields fall back to the store config.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOverrides {
    pub stale_time: Option<Duration>,
    pub debounce_time: Option<Duration>,
    pub deduplicate: Option<bool>,
}

impl AsyncStoreConfig {
    fn merge(self, overrides: RunOverrides) -> Self {
        Self {
            stale_time: overrides.stale_time.unwrap_or(self.stale_time),
            debounce_time: overrides.debounce_time.unwrap_or(self.debounce_time),
            deduplicate: overrides.deduplicate.unwrap_or(self.deduplicate),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Debouncing,
    InFlight,
}

/// Internal coordination state. Owned by the store, never exposed.
struct Coordination {
    /// Bumped on every accepted call; stale pipelines detect themselves
    /// by comparing against it.
    seq: u64,
    phase: Phase,
    last_success: Option<Instant>,
}

/// Observable `Async<T>` container driving one coordinated task.
///
/// Stores are long-lived and always return to idle after each
/// completed or discarded cycle; a failed task leaves the store fully
/// usable for subsequent `run` calls.
pub struct AsyncStore<T> {
    cell: Arc<StateCell<Async<T>>>,
    coord: Arc<Mutex<Coordination>>,
    config: AsyncStoreConfig,
}

impl<T: Clone + Send + Sync + 'static> AsyncStore<T> {
    /// Create an empty store with default configuration.
    pub fn new() -> Self {
        Self::with_config(AsyncStoreConfig::default())
    }

    /// Create an empty store with the given per-store defaults.
    pub fn with_config(config: AsyncStoreConfig) -> Self {
        Self::with_initial_state(Async::Empty, config)
    }

    /// Create a store seeded with `initial`.
    pub fn with_initial_state(initial: Async<T>, config: AsyncStoreConfig) -> Self {
        Self {
            cell: StateCell::new(initial),
            coord: Arc::new(Mutex::new(Coordination {
                seq: 0,
                phase: Phase::Idle,
                last_success: None,
            })),
            config,
        }
    }

    /// Run `task` through the coordination pipeline with the store's
    /// default configuration.
    ///
    /// Fire-and-forget: the call records a trigger and returns
    /// immediately. Task failure is captured into the `Error` state,
    /// never rethrown. Must be called within a tokio runtime.
    pub fn run<F, Fut>(&self, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        self.run_with(task, RunOverrides::default());
    }

    /// Like [`run`](Self::run), with per-call configuration overrides.
    pub fn run_with<F, Fut>(&self, task: F, overrides: RunOverrides)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        let config = self.config.merge(overrides);
        let my_seq;
        let emit_loading;
        {
            let mut coord = self.coord.lock();

            // Fresh data stands: suppress without emitting.
            if config.stale_time > Duration::ZERO && self.cell.read(|state| state.has_data()) {
                if let Some(at) = coord.last_success {
                    if at.elapsed() < config.stale_time {
                        debug!(store = %self.cell.id(), "run suppressed: data still fresh");
                        return;
                    }
                }
            }

            // A task is already awaiting completion: suppress.
            if config.deduplicate && coord.phase == Phase::InFlight {
                debug!(store = %self.cell.id(), "run suppressed: request already in flight");
                return;
            }

            coord.seq += 1;
            my_seq = coord.seq;
            // Superseding a pending debounce keeps the Loading already
            // on the stream; one debounce burst emits Loading once.
            emit_loading = coord.phase != Phase::Debouncing;
            coord.phase = Phase::Debouncing;
        }
        if emit_loading {
            self.cell.replace(Async::Loading);
        }

        let cell = Arc::clone(&self.cell);
        let coord = Arc::clone(&self.coord);
        tokio::spawn(async move {
            tokio::time::sleep(config.debounce_time).await;
            {
                let mut coord = coord.lock();
                if coord.seq != my_seq {
                    debug!(store = %cell.id(), "debounced call superseded before start");
                    return;
                }
                coord.phase = Phase::InFlight;
            }

            let result = task().await;

            let mut coord = coord.lock();
            if coord.seq != my_seq {
                debug!(store = %cell.id(), "settled task superseded, result discarded");
                return;
            }
            coord.phase = Phase::Idle;
            match result {
                Ok(value) => {
                    coord.last_success = Some(Instant::now());
                    drop(coord);
                    cell.replace(Async::Data(value));
                }
                Err(cause) => {
                    drop(coord);
                    debug!(store = %cell.id(), %cause, "task failed");
                    cell.replace(Async::error(cause));
                }
            }
        });
    }
}

impl<T: Clone + Send + Sync + 'static> Default for AsyncStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> Store<Async<T>> for AsyncStore<T> {
    fn id(&self) -> StoreId {
        self.cell.id()
    }

    fn snapshot(&self) -> Async<T> {
        self.cell.snapshot()
    }

    fn subscribe(
        &self,
        callback: impl Fn(&Async<T>) + Send + Sync + 'static,
    ) -> Subscription<Async<T>> {
        self.cell.subscribe(callback)
    }
}

impl<T> Clone for AsyncStore<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
            coord: Arc::clone(&self.coord),
            config: self.config,
        }
    }
}
