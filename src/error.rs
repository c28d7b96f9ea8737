use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Login failed! Check email and password")]
    InvalidCredentials,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Grams must be greater than zero")]
    InvalidQuantity,

    #[error("Calories per 100g must not be negative")]
    InvalidCalories,

    #[error("{0}")]
    Validation(String),

    #[error("Please log in to access this page")]
    Unauthenticated,

    #[error("{0}")]
    Denied(String),

    #[error("Storage unavailable")]
    StorageUnavailable(#[source] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if crate::db::value_too_long(&e) {
            return AppError::Validation("Value too long".into());
        }
        AppError::StorageUnavailable(e)
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<&'static str>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DuplicateEmail | AppError::DuplicateUsername => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidQuantity | AppError::InvalidCalories | AppError::Validation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Denied(_) => StatusCode::FORBIDDEN,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::DuplicateEmail => "duplicate_email",
            AppError::DuplicateUsername => "duplicate_username",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::NotFound(_) => "not_found",
            AppError::InvalidQuantity => "invalid_quantity",
            AppError::InvalidCalories => "invalid_calories",
            AppError::Validation(_) => "validation",
            AppError::Unauthenticated => "unauthenticated",
            AppError::Denied(_) => "denied",
            AppError::StorageUnavailable(_) => "storage_unavailable",
            AppError::Internal(_) => "internal",
        }
    }

    fn redirect_to(&self) -> Option<&'static str> {
        match self {
            AppError::Unauthenticated => Some("/login"),
            AppError::Denied(_) => Some("/dashboard"),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Storage and internal details stay in the logs.
        let message = match &self {
            AppError::StorageUnavailable(e) => {
                error!(error = %e, "storage unavailable");
                "Service temporarily unavailable".to_string()
            }
            AppError::Internal(e) => {
                error!(error = %e, "internal error");
                "Something went wrong".to_string()
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            error: self.code(),
            message,
            redirect_to: self.redirect_to(),
        };
        (status, Json(body)).into_response()
    }
}
