//! Error types for the SportIntel DFS toolkit

use thiserror::Error;


pub type Result<T> = std::result::Result<T, SportIntelError>;

#[derive(Error, Debug)]
pub enum SportIntelError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Rate limit exceeded for {provider}: {used}/{limit} requests")]
    RateLimitExceeded {
        provider: String,
        used: u32,
        limit: u32,
    },

    #[error("{provider} unavailable: {message}")]
    ProviderUnavailable { provider: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid input: {message}")]
    Validation { message: String },

    #[error("Player not found: {id}")]
    PlayerNotFound { id: String },

    #[error("Provider returned no data")]
    NoData,

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid {kind}: {value}")]
    InvalidValue { kind: &'static str, value: String },
}

impl SportIntelError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unavailable(provider: impl Into<String>, message: impl ToString) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            message: message.to_string(),
        }
    }

    /// Provider-level failures are converted into fallback attempts by the
    /// resolution layer. Configuration and validation errors never are.
    pub fn is_fallback_eligible(&self) -> bool {
        matches!(
            self,
            SportIntelError::Http(_)
                | SportIntelError::Json(_)
                | SportIntelError::RateLimitExceeded { .. }
                | SportIntelError::ProviderUnavailable { .. }
                | SportIntelError::NoData
        )
    }
}
