use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use brickfund_core::error::{CoreError, LedgerError};
use serde_json::json;

use crate::gateway::GatewayError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`LedgerError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce consistent
/// JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A generic domain error from `brickfund_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A ledger-taxonomy error (capacity, integrity, settlement).
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// A payment gateway failure; retryable, no partial state left behind.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Ledger taxonomy ---
            AppError::Ledger(ledger) => classify_ledger_error(ledger),

            // --- Gateway failures ---
            AppError::Gateway(err) => {
                tracing::error!(error = %err, "Payment gateway failure");
                (
                    StatusCode::BAD_GATEWAY,
                    "GATEWAY_UNAVAILABLE",
                    "Payment gateway is unavailable; please retry".to_string(),
                )
            }

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a ledger error to an HTTP status, error code, and message.
///
/// - Capacity failures (`BelowMinimum`, `InsufficientAmount`) are 422: the
///   request was well-formed but the amounts do not work.
/// - State-dependent failures (`ProjectNotOpen`, `ExceedsRemaining`,
///   `AlreadyInvested`) are 409: they may resolve as project state changes.
/// - `InvalidSignature` is 401: the callback failed authentication.
fn classify_ledger_error(err: &LedgerError) -> (StatusCode, &'static str, String) {
    let (status, code) = match err {
        LedgerError::BelowMinimum { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "BELOW_MINIMUM"),
        LedgerError::InsufficientAmount { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_AMOUNT")
        }
        LedgerError::ExceedsRemaining { .. } => (StatusCode::CONFLICT, "EXCEEDS_REMAINING"),
        LedgerError::ProjectNotOpen => (StatusCode::CONFLICT, "PROJECT_NOT_OPEN"),
        LedgerError::InvalidSignature => (StatusCode::UNAUTHORIZED, "INVALID_SIGNATURE"),
        LedgerError::PaymentNotFound => (StatusCode::NOT_FOUND, "PAYMENT_NOT_FOUND"),
        LedgerError::AlreadyInvested => (StatusCode::CONFLICT, "ALREADY_INVESTED"),
    };
    (status, code, err.to_string())
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
