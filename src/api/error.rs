use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::grid_tool::ToolError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed upload: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("{0}")]
    Tool(#[from] ToolError),

    #[error("Internal Server Error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Multipart(e) => {
                tracing::warn!("multipart parse error: {}", e);
                (StatusCode::BAD_REQUEST, format!("Error:\n{}", e))
            }
            AppError::Tool(e) => {
                tracing::error!("tool invocation failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Error:\n{}", e))
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}
