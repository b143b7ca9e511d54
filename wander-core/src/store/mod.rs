//! Local persistence.
//!
//! A flat JSON key-value store backs everything the app keeps on
//! device: the auth token, the signed-in user, favorites, and the
//! registered-user directory. Mutations write through to disk.
//!
//! Repositories share one store via [`SharedKvStore`]; the embedding
//! app opens the store once and hands clones around.

mod favorites;
mod kv;
mod session;

use std::sync::{Arc, Mutex};

pub use favorites::Favorites;
pub use kv::{KvStore, StoreError};
pub use session::{KEY_AUTH_TOKEN, KEY_FAVORITES, KEY_USER_DATA, SessionStore};

/// A key-value store shared between repositories.
pub type SharedKvStore = Arc<Mutex<KvStore>>;

impl KvStore {
    /// Wrap this store for sharing between repositories.
    pub fn into_shared(self) -> SharedKvStore {
        Arc::new(Mutex::new(self))
    }
}
