//! Error responses.
//!
//! Every failure leaves a handler as an [`ApiError`] wrapping `AppError`, and
//! is rendered as `{"error": <code>, "message": <text>}` with the status code
//! the error classifies itself with.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use staybook_core::integration::FeedError;
use staybook_core::ledger::LedgerError;
use staybook_core::reservation::ReservationError;
use staybook_db::repositories::{ImportError, LedgerStoreError, ReservationStoreError};
use staybook_shared::AppError;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Handler error rendered as a JSON body.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine readable code, e.g. `NOT_FOUND`.
    pub error: &'static str,
    /// Human readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = if self.0.is_internal() {
            tracing::error!(error = %self.0, "Request failed");
            "An error occurred".to_string()
        } else {
            self.0.to_string()
        };

        let body = ErrorBody {
            error: self.0.error_code(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ReservationError> for ApiError {
    fn from(err: ReservationError) -> Self {
        Self(err.into())
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        Self(err.into())
    }
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        Self(err.into())
    }
}

impl From<ReservationStoreError> for ApiError {
    fn from(err: ReservationStoreError) -> Self {
        Self(err.into())
    }
}

impl From<LedgerStoreError> for ApiError {
    fn from(err: LedgerStoreError) -> Self {
        Self(err.into())
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        Self(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(AppError::Validation(rejection.body_text()))
    }
}
