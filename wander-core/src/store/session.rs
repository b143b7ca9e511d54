//! Session persistence: auth token and signed-in user.

use std::sync::MutexGuard;

use crate::auth::UserProfile;

use super::SharedKvStore;
use super::kv::{KvStore, StoreError};

/// Store key for the auth token.
pub const KEY_AUTH_TOKEN: &str = "auth_token";

/// Store key for the signed-in user profile.
pub const KEY_USER_DATA: &str = "user_data";

/// Store key for the favorites list.
pub const KEY_FAVORITES: &str = "favorites";

/// Typed access to the persisted session.
#[derive(Clone)]
pub struct SessionStore {
    store: SharedKvStore,
}

impl SessionStore {
    /// Create a session store over a shared store.
    pub fn new(store: SharedKvStore) -> Self {
        Self { store }
    }

    /// Persist the auth token.
    pub fn save_token(&self, token: &str) -> Result<(), StoreError> {
        self.lock().put(KEY_AUTH_TOKEN, &token)
    }

    /// The persisted auth token, if any.
    pub fn token(&self) -> Result<Option<String>, StoreError> {
        self.lock().get(KEY_AUTH_TOKEN)
    }

    /// Forget the auth token.
    pub fn delete_token(&self) -> Result<(), StoreError> {
        self.lock().remove(KEY_AUTH_TOKEN)?;
        Ok(())
    }

    /// Persist the signed-in user.
    pub fn save_user(&self, user: &UserProfile) -> Result<(), StoreError> {
        self.lock().put(KEY_USER_DATA, user)
    }

    /// The persisted user, if any.
    pub fn user(&self) -> Result<Option<UserProfile>, StoreError> {
        self.lock().get(KEY_USER_DATA)
    }

    /// Forget the signed-in user.
    pub fn delete_user(&self) -> Result<(), StoreError> {
        self.lock().remove(KEY_USER_DATA)?;
        Ok(())
    }

    /// Sign-out: drop everything persisted, favorites included.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        self.lock().clear()
    }

    fn lock(&self) -> MutexGuard<'_, KvStore> {
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn session(dir: &tempfile::TempDir) -> SessionStore {
        let store = KvStore::open(dir.path().join("state.json")).unwrap();
        SessionStore::new(store.into_shared())
    }

    fn profile() -> UserProfile {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "username": "emilys",
            "email": "emily@example.com",
            "firstName": "Emily",
            "lastName": "Stone",
        }))
        .unwrap()
    }

    #[test]
    fn token_roundtrip() {
        let dir = tempdir().unwrap();
        let session = session(&dir);

        assert_eq!(session.token().unwrap(), None);
        session.save_token("tok-123").unwrap();
        assert_eq!(session.token().unwrap().as_deref(), Some("tok-123"));

        session.delete_token().unwrap();
        assert_eq!(session.token().unwrap(), None);
    }

    #[test]
    fn user_roundtrip() {
        let dir = tempdir().unwrap();
        let session = session(&dir);

        session.save_user(&profile()).unwrap();
        let user = session.user().unwrap().unwrap();
        assert_eq!(user.username, "emilys");

        session.delete_user().unwrap();
        assert!(session.user().unwrap().is_none());
    }

    #[test]
    fn clear_all_wipes_the_store() {
        let dir = tempdir().unwrap();
        let session = session(&dir);

        session.save_token("tok").unwrap();
        session.save_user(&profile()).unwrap();
        session.clear_all().unwrap();

        assert!(session.token().unwrap().is_none());
        assert!(session.user().unwrap().is_none());
    }
}
