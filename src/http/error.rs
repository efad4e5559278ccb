//! HTTP error handling and response types.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use crate::utils::errors::SchoolDeskError;

/// API error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status code, repeated for clients that only see the body
    pub status: u16,
    pub code: String,
    pub message: String,
}

impl From<&SchoolDeskError> for ApiError {
    fn from(err: &SchoolDeskError) -> Self {
        let status = err.status_code();
        // Store and internal details stay in the logs
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            err.to_string()
        };

        Self {
            status: status.as_u16(),
            code: err.code().to_string(),
            message,
        }
    }
}

impl IntoResponse for SchoolDeskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.code(), severity = %self.severity(), error = %self, "Request failed");
        }

        (status, Json(ApiError::from(&self))).into_response()
    }
}

impl From<JsonRejection> for SchoolDeskError {
    fn from(rejection: JsonRejection) -> Self {
        SchoolDeskError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for SchoolDeskError {
    fn from(rejection: PathRejection) -> Self {
        SchoolDeskError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for SchoolDeskError {
    fn from(rejection: QueryRejection) -> Self {
        SchoolDeskError::InvalidInput(rejection.body_text())
    }
}
