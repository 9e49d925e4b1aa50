//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Botica                                 │
//! │                                                                         │
//! │  Handler → Service: Result<T, ApiError>                                │
//! │         │                                                               │
//! │         ├── ValidationError / CoreError::EmptyPatch ──► INVALID_ARGUMENT│
//! │         ├── CoreError::*NotFound / DbError::NotFound ─► NOT_FOUND       │
//! │         ├── DbError Unique / ForeignKey ──────────────► INVALID_ARGUMENT│
//! │         └── any other DbError (logged) ───────────────► INTERNAL        │
//! │                                                                         │
//! │  IntoResponse:                                                          │
//! │    400 / 404 / 500   { "ok": false, "code": "...", "message": "..." }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use botica_core::{CoreError, ValidationError};
use botica_db::DbError;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// { "ok": false, "code": "NOT_FOUND", "message": "Product 42 not found" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed (400)
    InvalidArgument,

    /// Resource not found (404)
    NotFound,

    /// Store or unexpected failure (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidArgument, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Converts database errors to API errors.
///
/// Store details are logged, never sent to the client.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                ApiError::not_found(format!("{} {} not found", entity, id))
            }
            DbError::UniqueViolation { field, .. } => {
                tracing::warn!(field = %field, "Unique constraint rejected write");
                ApiError::invalid_argument(format!("A record with the same {} already exists", field))
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::invalid_argument(
                    "Invalid reference: the referenced record does not exist or is still in use",
                )
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::internal("Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::internal("Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::internal("Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::internal("Database transaction failed")
            }
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ApiError::internal("Database is busy, try again")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::internal("Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if err.is_not_found() {
            return ApiError::not_found(err.to_string());
        }
        ApiError::invalid_argument(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::invalid_argument(err.to_string())
    }
}

/// Malformed or mistyped JSON bodies.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_argument(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    ok: bool,
    code: ErrorCode,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            ok: false,
            code: self.code,
            message: &self.message,
        };
        (self.code.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_mapping() {
        assert_eq!(
            ApiError::from(DbError::not_found("Product", 9)).code,
            ErrorCode::NotFound
        );
        assert_eq!(
            ApiError::from(DbError::UniqueViolation {
                field: "products.code".to_string(),
                value: "X".to_string(),
            })
            .code,
            ErrorCode::InvalidArgument
        );
        assert_eq!(
            ApiError::from(DbError::ForeignKeyViolation {
                message: "FOREIGN KEY constraint failed".to_string()
            })
            .code,
            ErrorCode::InvalidArgument
        );

        let err = ApiError::from(DbError::QueryFailed("no such table: products".to_string()));
        assert_eq!(err.code, ErrorCode::Internal);
        assert!(!err.message.contains("no such table"));
    }

    #[test]
    fn test_core_error_mapping() {
        let err = ApiError::from(CoreError::SupplierNotFound(3));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Supplier 3 not found");

        assert_eq!(
            ApiError::from(CoreError::EmptyPatch).code,
            ErrorCode::InvalidArgument
        );
        assert_eq!(
            ApiError::from(ValidationError::required("nombre")).code,
            ErrorCode::InvalidArgument
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorCode::InvalidArgument.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
