//! Authentication against the demo user API.
//!
//! Login checks the locally registered user directory first and falls
//! through to the remote demo API. Registration is local-first: the
//! directory is authoritative and the remote write is best-effort.
//!
//! This is a demo flow; credentials are stored as-is and nothing here
//! is a security boundary.

mod client;
mod error;
mod users;

pub use client::{AuthClient, AuthConfig, Credentials, Session};
pub use error::AuthError;
pub use users::{NewUser, UserDirectory, UserProfile};
