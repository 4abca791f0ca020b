//! External feed error types.

use staybook_shared::AppError;
use thiserror::Error;

use crate::reservation::Platform;

/// Errors raised by reservation feeds.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The platform's API key is not configured.
    #[error("{0} API key is not configured")]
    NotConfigured(Platform),

    /// The platform has no external feed.
    #[error("Platform does not support sync: {0}")]
    UnsupportedPlatform(String),

    /// The uploaded file cannot be read as CSV.
    #[error("Invalid CSV file: {0}")]
    InvalidCsv(String),

    /// The platform API failed.
    #[error("{platform} API error: {message}")]
    Upstream {
        /// Platform that failed.
        platform: Platform,
        /// Error reported by the platform.
        message: String,
    },
}

impl FeedError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotConfigured(_) => "FEED_NOT_CONFIGURED",
            Self::UnsupportedPlatform(_) => "UNSUPPORTED_PLATFORM",
            Self::InvalidCsv(_) => "INVALID_CSV",
            Self::Upstream { .. } => "FEED_UPSTREAM_ERROR",
        }
    }
}

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        let message = err.to_string();
        match err {
            FeedError::NotConfigured(_) => Self::Unavailable(message),
            FeedError::UnsupportedPlatform(_) | FeedError::InvalidCsv(_) => {
                Self::Validation(message)
            }
            FeedError::Upstream { .. } => Self::ExternalService(message),
        }
    }
}
