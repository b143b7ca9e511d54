//! Auth error types.

use crate::store::StoreError;

/// Errors from login and registration.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Login attempted with an empty username or password
    #[error("username and password are required")]
    MissingCredentials,

    /// Registration attempted with an empty field
    #[error("all registration fields are required")]
    IncompleteRegistration,

    /// Registration attempted with a username that already exists
    #[error("this username is already registered")]
    UsernameTaken,

    /// Username/password pair rejected
    #[error("invalid credentials")]
    InvalidCredentials,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// The user directory could not be read or written
    #[error("user store error: {0}")]
    Store(#[from] StoreError),
}
