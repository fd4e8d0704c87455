use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use drr_core::ValidationError;
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// No record carries the requested id
    #[error("Record with ID {id} not found")]
    NotFound { id: String },

    /// Body refused by strict-mode validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::NotFound { .. } => "Data not found".to_string(),
            Error::Validation(e) => e.to_string(),
            Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match &self {
            Error::Other(_) => tracing::error!("Internal service error: {:#}", self),
            Error::NotFound { .. } | Error::Validation(_) => tracing::debug!("Client error: {}", self),
        }

        let body = json!({ "error": self.user_message() });
        (self.status_code(), Json(body)).into_response()
    }
}
