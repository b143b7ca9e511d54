//! The registered-user directory.

use std::collections::HashMap;
use std::sync::{Arc, MutexGuard};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::store::{KvStore, SharedKvStore, StoreError};

use super::error::AuthError;

/// Store key for the registered-user map.
const KEY_REGISTERED_USERS: &str = "registered_users";

/// A user as exposed to callers. Never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Registration input. All fields are required.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// A registered user as persisted, password included (demo flow).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    id: u64,
    first_name: String,
    last_name: String,
    username: String,
    email: String,
    password: String,
}

impl UserRecord {
    fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
        }
    }
}

/// Repository of locally registered users.
///
/// Loaded from the shared store at startup and written through on every
/// registration, so the directory survives restarts. Thread-safe and
/// cheap to clone.
#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
    store: SharedKvStore,
}

impl UserDirectory {
    /// Load the directory from the shared store.
    pub fn load(store: SharedKvStore) -> Result<Self, StoreError> {
        let users = {
            let guard = lock(&store);
            guard.get(KEY_REGISTERED_USERS)?.unwrap_or_default()
        };

        Ok(Self {
            users: Arc::new(RwLock::new(users)),
            store,
        })
    }

    /// Register a new user.
    ///
    /// Validates that every field is non-empty and the username is not
    /// taken, then writes through to the store.
    pub async fn register(&self, new_user: NewUser) -> Result<UserProfile, AuthError> {
        if [
            &new_user.first_name,
            &new_user.last_name,
            &new_user.username,
            &new_user.email,
            &new_user.password,
        ]
        .iter()
        .any(|field| field.trim().is_empty())
        {
            return Err(AuthError::IncompleteRegistration);
        }

        let mut users = self.users.write().await;

        if users.contains_key(&new_user.username) {
            return Err(AuthError::UsernameTaken);
        }

        let record = UserRecord {
            id: next_user_id(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            username: new_user.username.clone(),
            email: new_user.email,
            password: new_user.password,
        };
        let profile = record.profile();

        users.insert(new_user.username, record);
        lock(&self.store).put(KEY_REGISTERED_USERS, &*users)?;

        Ok(profile)
    }

    /// Check a username/password pair against the directory.
    ///
    /// Returns the profile on a match, `InvalidCredentials` when the
    /// user exists but the password is wrong, and `Ok(None)` for an
    /// unknown username (the caller may then try the remote API).
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserProfile>, AuthError> {
        let users = self.users.read().await;

        match users.get(username) {
            None => Ok(None),
            Some(record) if record.password == password => Ok(Some(record.profile())),
            Some(_) => Err(AuthError::InvalidCredentials),
        }
    }

    /// Number of registered users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether no users are registered.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn lock(store: &SharedKvStore) -> MutexGuard<'_, KvStore> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Millisecond timestamp ids. Good enough for a local directory.
fn next_user_id() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
