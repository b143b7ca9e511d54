//! Demo user API HTTP client.

use std::time::SystemTime;

use serde::Deserialize;
use tracing::debug;

use super::error::AuthError;
use super::users::{NewUser, UserDirectory, UserProfile};

/// Default base URL for the demo user API.
const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the auth client.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AuthConfig {
    /// Create a config pointing at the default demo API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A username/password pair as entered by the user.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A successful sign-in.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The signed-in user.
    pub user: UserProfile,
}

/// Remote login response. The demo API has shipped the token under two
/// different field names over time; accept both.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(flatten)]
    user: UserProfile,

    #[serde(default)]
    token: Option<String>,

    #[serde(default, rename = "accessToken")]
    access_token: Option<String>,
}

/// Auth client: local user directory first, demo API second.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    directory: UserDirectory,
}

impl AuthClient {
    /// Create a new auth client over a user directory.
    pub fn new(config: AuthConfig, directory: UserDirectory) -> Result<Self, AuthError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            directory,
        })
    }

    /// Sign a user in.
    ///
    /// A locally registered username is verified against the directory
    /// and never leaves the device. Unknown usernames are tried against
    /// the demo API's seeded accounts.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        if credentials.username.is_empty() || credentials.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        if let Some(user) = self
            .directory
            .authenticate(&credentials.username, &credentials.password)
            .await?
        {
            return Ok(Session {
                token: local_token(),
                user,
            });
        }

        self.login_remote(credentials).await
    }

    /// Register a new user.
    ///
    /// The local directory is authoritative. The demo API write is
    /// best-effort: its failure is logged and ignored.
    pub async fn register(&self, new_user: NewUser) -> Result<UserProfile, AuthError> {
        let profile = self.directory.register(new_user.clone()).await?;

        if let Err(e) = self.register_remote(&new_user).await {
            debug!(error = %e, "demo API registration skipped, user stored locally");
        }

        Ok(profile)
    }

    async fn login_remote(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let url = format!("{}/auth/login", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "username": credentials.username,
                "password": credentials.password,
            }))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::UNAUTHORIZED
        {
            return Err(AuthError::InvalidCredentials);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let login: LoginResponse = serde_json::from_str(&body).map_err(|e| AuthError::Json {
            message: e.to_string(),
        })?;

        let token = login
            .token
            .or(login.access_token)
            .ok_or_else(|| AuthError::Json {
                message: "login response carried no token".to_string(),
            })?;

        Ok(Session {
            token,
            user: login.user,
        })
    }

    async fn register_remote(&self, new_user: &NewUser) -> Result<(), AuthError> {
        let url = format!("{}/users/add", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "firstName": new_user.first_name,
                "lastName": new_user.last_name,
                "username": new_user.username,
                "email": new_user.email,
                "password": new_user.password,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(())
    }
}

/// Token for sessions verified against the local directory.
fn local_token() -> String {
    let millis = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("local-token-{millis}")
}
