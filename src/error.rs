use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("A company name and an apply link are both required")]
    Validation,

    #[error("Company already exists: {0}")]
    Duplicate(String),

    #[error("No entry named: {0}")]
    NotFound(String),

    #[error("Mentor directory unreachable: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Persisted entry for {key} is corrupt")]
    StorageParse { key: String },

    #[error("Internal error: {0}")]
    Internal(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation => StatusCode::BAD_REQUEST,
            AppError::Duplicate { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Fetch { .. } => StatusCode::BAD_GATEWAY,
            AppError::StorageParse { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}
