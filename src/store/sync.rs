//! Synchronous mutable store.

use std::sync::Arc;

use super::base::{StateCell, Store, StoreId, Subscription};

/// Observable state container with synchronous, in-place mutation.
///
/// `update` and `reset` are the only mutation entry points; everything
/// else is read-only. Clones share the same underlying state, like the
/// thread-safe containers elsewhere in this crate.
pub struct SyncStore<T> {
    cell: Arc<StateCell<T>>,
    initial: T,
}

impl<T: Clone + Send + Sync + 'static> SyncStore<T> {
    /// Create a store holding `initial`. The value is retained so
    /// [`reset`](Self::reset) can restore it later.
    pub fn new(initial: T) -> Self {
        Self {
            cell: StateCell::new(initial.clone()),
            initial,
        }
    }

    /// Atomically replace the state with `f(&current)` and emit it.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        self.cell.update(f);
    }

    /// Atomically restore the construction-time value and emit it.
    pub fn reset(&self) {
        self.cell.replace(self.initial.clone());
    }

    /// Read the current state in place, without cloning.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.cell.read(f)
    }
}

impl<T: Clone + Send + Sync + 'static> Store<T> for SyncStore<T> {
    fn id(&self) -> StoreId {
        self.cell.id()
    }

    fn snapshot(&self) -> T {
        self.cell.snapshot()
    }

    fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription<T> {
        self.cell.subscribe(callback)
    }
}

impl<T: Clone> Clone for SyncStore<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
            initial: self.initial.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn update_emits_transformed_state() {
        let store = SyncStore::new(10);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = store.subscribe(move |n: &i32| sink.lock().unwrap().push(*n));

        store.update(|n| n + 5);

        assert_eq!(store.snapshot(), 15);
        assert_eq!(*seen.lock().unwrap(), vec![10, 15]);
    }

    #[test]
    fn snapshot_immediately_reflects_update() {
        let store = SyncStore::new(String::from("a"));
        store.update(|s| format!("{s}b"));
        assert_eq!(store.snapshot(), "ab");
    }

    #[test]
    fn reset_restores_initial_regardless_of_history() {
        let store = SyncStore::new(vec![1, 2]);
        store.update(|v| {
            let mut next = v.clone();
            next.push(3);
            next
        });
        store.update(|_| Vec::new());

        store.reset();
        assert_eq!(store.snapshot(), vec![1, 2]);
    }

    #[test]
    fn reset_emits() {
        let store = SyncStore::new(0);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = store.subscribe(move |n: &i32| sink.lock().unwrap().push(*n));

        store.update(|_| 9);
        store.reset();

        assert_eq!(*seen.lock().unwrap(), vec![0, 9, 0]);
    }

    #[test]
    fn update_closure_may_read_the_store() {
        let store = SyncStore::new(2);
        let alias = store.clone();

        store.update(|n| n + alias.snapshot());
        assert_eq!(store.snapshot(), 4);

        store.update(|n| n * alias.read(|m| *m));
        assert_eq!(store.snapshot(), 16);
    }

    #[test]
    fn clones_share_state() {
        let store = SyncStore::new(1);
        let alias = store.clone();
        alias.update(|n| n * 2);
        assert_eq!(store.snapshot(), 2);
        assert_eq!(store.id(), alias.id());
    }
}
