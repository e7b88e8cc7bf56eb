use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::InvalidLanguage;

/// Errors surfaced to API clients.
///
/// Feed failures never reach this type; they are absorbed per source by the
/// fetcher.
#[derive(Debug, Error)]
pub enum AppError {
    /// The `lang` path segment is not `tr`, `en` or `all`.
    #[error(transparent)]
    InvalidLanguage(#[from] InvalidLanguage),
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidLanguage(_) => StatusCode::BAD_REQUEST,
        };
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
