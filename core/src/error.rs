// core/src/error.rs
use thiserror::Error;

/// Failure of a call through the API gateway or catalog client.
///
/// `Display` is the human-readable message meant for the UI: for API errors it
/// is the backend's `error` field or the per-operation fallback.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{message}: {source}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message}: malformed response body ({source})")]
    Decode {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Gateway configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status for `Api` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum CartError {
    /// The operation needs a logged-in user; raised before any network call.
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable '{var}'")]
    Missing { var: String },

    #[error("Invalid value for '{var}': {message}")]
    Invalid { var: String, message: String },
}

pub type GatewayResult<T, E = GatewayError> = std::result::Result<T, E>;
pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
