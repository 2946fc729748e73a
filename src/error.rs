//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the library returns [`AppError`]. Client
//! errors are rendered with a `detail` body; server errors are logged with
//! their structured details and rendered with a generic message only.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation { message: String, details: Value },

    #[error("not found: {message}")]
    NotFound { message: String, details: Value },

    /// Transient storage conflict. Retried once before it is surfaced.
    #[error("conflict: {message}")]
    Conflict { message: String, details: Value },

    #[error("unavailable: {message}")]
    Unavailable { message: String, details: Value },

    #[error("internal error: {message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Whether the failed operation may succeed if simply run again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Validation { message, details } => {
                json!({ "detail": message, "errors": details })
            }
            AppError::NotFound { .. } => json!({ "detail": "Not Found" }),
            AppError::Unavailable { message, details } => {
                tracing::error!(%message, %details, "Storage unavailable");
                json!({ "detail": "Service Unavailable" })
            }
            AppError::Conflict { message, details } | AppError::Internal { message, details } => {
                tracing::error!(%message, %details, "Request failed");
                json!({ "detail": "Internal Server Error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            let details = json!({
                "code": db.code().map(|c| c.into_owned()),
                "constraint": db.constraint(),
            });

            if db.is_unique_violation() {
                return AppError::conflict("Unique constraint violation", details);
            }
            if db.is_foreign_key_violation() {
                return AppError::not_found("Referenced shortlink does not exist", details);
            }
            if matches!(db.code().as_deref(), Some("40001") | Some("40P01")) {
                return AppError::conflict("Transaction conflict", details);
            }

            return AppError::internal("Database error", details);
        }

        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::unavailable("Database pool exhausted or closed", json!({}))
            }
            sqlx::Error::Io(err) => {
                AppError::unavailable("Database I/O error", json!({ "error": err.to_string() }))
            }
            sqlx::Error::Tls(err) => {
                AppError::unavailable("Database TLS error", json!({ "error": err.to_string() }))
            }
            other => AppError::internal("Database error", json!({ "error": other.to_string() })),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::validation("Validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(rejection.body_text(), json!({ "source": "body" }))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation(rejection.body_text(), json!({ "source": "query" }))
    }
}
