//! API error type and its JSON response mapping
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pipewatch_core::PipewatchError;
use pipewatch_pacp::PacpError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Dataset error: {0}")]
    Dataset(#[from] PipewatchError),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl From<PacpError> for ApiError {
    fn from(err: PacpError) -> Self {
        match err {
            PacpError::UnknownCategory(_) => ApiError::NotFound(err.to_string()),
            other => ApiError::Dataset(other.into()),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Dataset(PipewatchError::UnknownSegment(_)) => StatusCode::NOT_FOUND,
            ApiError::Dataset(PipewatchError::Pacp(PacpError::UnknownCategory(_))) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Dataset(_) | ApiError::Metrics(_) | ApiError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = json!({
            "error": self.to_string(),
            "status": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}
