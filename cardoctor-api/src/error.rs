use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cardoctor_core::{repository::StoreError, CoreError};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No session cookie on a protected request.
    #[error("Not authorized")]
    Unauthenticated,
    /// Session cookie present but the token is invalid or expired.
    #[error("unauthorized")]
    Unauthorized,
    /// Valid token, but for a different identity than the one requested.
    #[error("forbidden access")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("Token signing failed: {0}")]
    Signing(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => AppError::Validation(msg),
            CoreError::IdentityError(_) => AppError::Unauthorized,
            CoreError::SigningError(msg) => AppError::Signing(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Unauthenticated | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Signing(_) | AppError::Store(_) => {
                tracing::error!("Internal Server Error: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
