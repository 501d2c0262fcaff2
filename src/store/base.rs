//! Shared store machinery: identity, state cell, subscriptions.

use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use uuid::Uuid;

/// Process-unique store identity, minted at creation.
///
/// UI-binding layers compare ids to detect store *identity* changes,
/// not just value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreId(Uuid);

impl StoreId {
    pub(crate) fn mint() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Read-only observable store contract.
///
/// The snapshot and the push stream are fed from the same cell: a
/// subscriber is never notified of a value the snapshot does not
/// already return.
pub trait Store<T: Clone> {
    /// This store's process-unique identity.
    fn id(&self) -> StoreId;

    /// The current state, synchronously, without triggering computation.
    fn snapshot(&self) -> T;

    /// Attach a change listener.
    ///
    /// The callback immediately receives the latest value (replay),
    /// then runs on every subsequent emission until the returned handle
    /// is cancelled.
    fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription<T>;
}

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

struct SubscriberList<T> {
    next_key: u64,
    entries: Vec<(u64, Callback<T>)>,
}

/// State + subscriber registry shared by both store kinds.
///
/// Mutations replace the state under the write lock, then notify
/// subscribers with the value just written, so the snapshot is already
/// current by the time any callback observes the change.
pub(crate) struct StateCell<T> {
    id: StoreId,
    state: RwLock<T>,
    subscribers: RwLock<SubscriberList<T>>,
}

impl<T: Clone> StateCell<T> {
    pub(crate) fn new(initial: T) -> Arc<Self> {
        Arc::new(Self {
            id: StoreId::mint(),
            state: RwLock::new(initial),
            subscribers: RwLock::new(SubscriberList {
                next_key: 0,
                entries: Vec::new(),
            }),
        })
    }

    pub(crate) fn id(&self) -> StoreId {
        self.id
    }

    /// Clone out the current state.
    pub(crate) fn snapshot(&self) -> T {
        self.state.read().expect("store state lock poisoned").clone()
    }

    /// Read the current state without cloning.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let state = self.state.read().expect("store state lock poisoned");
        f(&state)
    }

    /// Replace the state and notify all subscribers with the new value.
    pub(crate) fn replace(&self, new_state: T) {
        {
            let mut state = self.state.write().expect("store state lock poisoned");
            *state = new_state.clone();
        }
        let subscribers = self
            .subscribers
            .read()
            .expect("store subscriber lock poisoned");
        for (_, callback) in subscribers.entries.iter() {
            callback(&new_state);
        }
    }

    /// Transform the state, then notify.
    ///
    /// The closure runs on a clone taken under a short read lock, so it
    /// may call back into `snapshot()` or `read()` on the same store.
    pub(crate) fn update(&self, f: impl FnOnce(&T) -> T) {
        let current = self.snapshot();
        let new_state = f(&current);
        {
            let mut state = self.state.write().expect("store state lock poisoned");
            *state = new_state.clone();
        }
        let subscribers = self
            .subscribers
            .read()
            .expect("store subscriber lock poisoned");
        for (_, callback) in subscribers.entries.iter() {
            callback(&new_state);
        }
    }

    pub(crate) fn subscribe(
        self: &Arc<Self>,
        callback: impl Fn(&T) + Send + Sync + 'static,
    ) -> Subscription<T> {
        let key = {
            let mut subscribers = self
                .subscribers
                .write()
                .expect("store subscriber lock poisoned");
            let key = subscribers.next_key;
            subscribers.next_key += 1;
            subscribers.entries.push((key, Box::new(callback)));
            key
        };
        // Replay the latest value to the new subscriber. The state lock
        // is released first so the callback may take its own snapshot.
        {
            let current = self.snapshot();
            let subscribers = self
                .subscribers
                .read()
                .expect("store subscriber lock poisoned");
            if let Some((_, callback)) = subscribers.entries.iter().find(|(k, _)| *k == key) {
                callback(&current);
            }
        }
        Subscription {
            key,
            cell: Arc::downgrade(self),
        }
    }
}

/// Handle returned by [`Store::subscribe`].
///
/// Dropping the handle keeps the subscription alive; delivery stops
/// only on an explicit [`cancel`](Subscription::cancel) or when the
/// store itself is dropped.
pub struct Subscription<T> {
    key: u64,
    cell: Weak<StateCell<T>>,
}

impl<T> Subscription<T> {
    /// Detach the callback. No further notifications are delivered.
    pub fn cancel(self) {
        if let Some(cell) = self.cell.upgrade() {
            let mut subscribers = cell
                .subscribers
                .write()
                .expect("store subscriber lock poisoned");
            subscribers.entries.retain(|(k, _)| *k != self.key);
        }
    }
}
