//! Favorites membership service.

use std::collections::BTreeSet;

use crate::store::{Store, StoreId, Subscription, SyncStore};

/// Set-membership store over pokemon names.
///
/// `toggle` is its own inverse: toggling the same id twice restores
/// the previous state.
#[derive(Clone)]
pub struct FavoritesService {
    store: SyncStore<BTreeSet<String>>,
}

impl FavoritesService {
    pub fn new() -> Self {
        Self {
            store: SyncStore::new(BTreeSet::new()),
        }
    }

    /// Add `id` if absent, remove it if present, and emit the new set.
    pub fn toggle(&self, id: &str) {
        self.store.update(|current| {
            let mut next = current.clone();
            if !next.remove(id) {
                next.insert(id.to_string());
            }
            next
        });
    }

    /// Whether `id` is currently a favorite.
    pub fn is_favorite(&self, id: &str) -> bool {
        self.store.read(|favorites| favorites.contains(id))
    }

    /// Clear back to the empty construction-time state and emit.
    pub fn reset(&self) {
        self.store.reset();
    }
}

impl Default for FavoritesService {
    fn default() -> Self {
        Self::new()
    }
}

impl Store<BTreeSet<String>> for FavoritesService {
    fn id(&self) -> StoreId {
        self.store.id()
    }

    fn snapshot(&self) -> BTreeSet<String> {
        self.store.snapshot()
    }

    fn subscribe(
        &self,
        callback: impl Fn(&BTreeSet<String>) + Send + Sync + 'static,
    ) -> Subscription<BTreeSet<String>> {
        self.store.subscribe(callback)
    }
}
