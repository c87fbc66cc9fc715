//! Error types for the completion endpoint.

use crate::types::CompletionErrorBody;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

/// User-safe message returned for every provider failure.
pub const COMPLETION_FAILED: &str = "Failed to generate completion";

/// Completion endpoint errors.
#[derive(Debug)]
pub enum CompletionError {
    /// The gateway could not produce a completion.
    Gateway { region: String, details: String },
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gateway { region, details } => {
                write!(f, "completion for '{}' failed: {}", region, details)
            }
        }
    }
}

impl std::error::Error for CompletionError {}

impl IntoResponse for CompletionError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Gateway { region, details } => {
                tracing::error!(region = %region, error = %details, "completion request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, COMPLETION_FAILED)
            }
        };

        (
            status,
            Json(CompletionErrorBody {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
