use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::services::error::CatalogueError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable error description.
    #[schema(example = "Cheese not found")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    NotFound(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, ErrorBody { message }),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, ErrorBody { message }),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        message: "An unexpected error occurred".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<CatalogueError> for AppError {
    fn from(err: CatalogueError) -> Self {
        match err {
            CatalogueError::DuplicateId(_) | CatalogueError::InvalidInput(_) => {
                AppError::Validation(err.to_string())
            }
            CatalogueError::NotFound => AppError::NotFound(err.to_string()),
            CatalogueError::Storage(e) => AppError::Internal(e.to_string()),
        }
    }
}
