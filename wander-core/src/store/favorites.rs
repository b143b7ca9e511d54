//! The favorites repository.

use std::sync::MutexGuard;

use crate::domain::Place;

use super::kv::{KvStore, StoreError};
use super::session::KEY_FAVORITES;
use super::SharedKvStore;

/// Persistent list of favorited places.
///
/// Places are stored verbatim as snapshots, in insertion order, at most
/// one per place id. Every mutation writes through to the backing store.
#[derive(Clone)]
pub struct Favorites {
    store: SharedKvStore,
}

impl Favorites {
    /// Create a repository over a shared store.
    pub fn new(store: SharedKvStore) -> Self {
        Self { store }
    }

    /// All favorites, oldest first. A store with no favorites yet is empty.
    pub fn list(&self) -> Result<Vec<Place>, StoreError> {
        let store = self.lock();
        Ok(store.get(KEY_FAVORITES)?.unwrap_or_default())
    }

    /// Add a place snapshot.
    ///
    /// Returns `false` without touching the store when a place with the
    /// same id is already favorited.
    pub fn add(&self, place: Place) -> Result<bool, StoreError> {
        let mut store = self.lock();
        let mut places: Vec<Place> = store.get(KEY_FAVORITES)?.unwrap_or_default();

        if places.iter().any(|existing| existing.id == place.id) {
            return Ok(false);
        }

        places.push(place);
        store.put(KEY_FAVORITES, &places)?;
        Ok(true)
    }

    /// Remove a favorite by place id. Returns whether it was present.
    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut store = self.lock();
        let mut places: Vec<Place> = store.get(KEY_FAVORITES)?.unwrap_or_default();

        let before = places.len();
        places.retain(|place| place.id != id);

        if places.len() == before {
            return Ok(false);
        }

        store.put(KEY_FAVORITES, &places)?;
        Ok(true)
    }

    /// Whether a place id is favorited.
    pub fn contains(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.list()?.iter().any(|place| place.id == id))
    }

    /// Remove every favorite.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut store = self.lock();
        store.put(KEY_FAVORITES, &Vec::<Place>::new())
    }

    fn lock(&self) -> MutexGuard<'_, KvStore> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
