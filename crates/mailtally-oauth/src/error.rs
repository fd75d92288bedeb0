//! Errors raised while authorizing against Google.

use thiserror::Error;

/// Authorization failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing the client secret or token cache failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The token endpoint could not be reached.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON document did not have the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Google refused the request (`invalid_grant`, `access_denied`, ...).
    #[error("OAuth2 error: {error} - {description}")]
    OAuth {
        /// Error code.
        error: String,
        /// Human-readable description, possibly empty.
        description: String,
    },

    /// The cached token cannot be refreshed.
    #[error("No refresh token available")]
    NoRefreshToken,

    /// A token response or pasted redirect was unusable.
    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    /// An endpoint is not an http(s) URL.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The client secret file is missing required fields.
    #[error("Invalid client secret: {0}")]
    ClientSecret(String),

    /// An endpoint URL does not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
