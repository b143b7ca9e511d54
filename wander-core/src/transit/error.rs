//! Transit client error types.

use std::fmt;

/// Errors from the transit HTTP client.
#[derive(Debug)]
pub enum TransitError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// Invalid credentials (app_id / app_key rejected)
    Unauthorized,

    /// Rate limited by the API
    RateLimited,
}

impl fmt::Display for TransitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitError::Http(e) => write!(f, "HTTP error: {e}"),
            TransitError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            TransitError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            TransitError::Unauthorized => write!(f, "unauthorized (app_id/app_key rejected)"),
            TransitError::RateLimited => write!(f, "rate limited by transit API"),
        }
    }
}

impl std::error::Error for TransitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransitError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransitError {
    fn from(err: reqwest::Error) -> Self {
        TransitError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TransitError::Unauthorized;
        assert_eq!(err.to_string(), "unauthorized (app_id/app_key rejected)");

        let err = TransitError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = TransitError::Json {
            message: "expected a list".into(),
            body: Some("{}".into()),
        };
        assert!(err.to_string().contains("JSON parse error"));
        assert!(err.to_string().contains("(body: {})"));
    }
}
