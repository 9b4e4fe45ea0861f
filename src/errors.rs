use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Plain `{ "message": ... }` body used for not-found and informational replies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Warehouse not found.")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned for unexpected failures
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status category (e.g. "Internal Server Error")
    #[schema(example = "Internal Server Error")]
    pub error: String,
    /// Human-readable error description
    #[schema(example = "Internal server error")]
    pub message: String,
    /// ISO 8601 timestamp when error occurred
    #[schema(example = "2024-12-09T10:30:00.000Z")]
    pub timestamp: String,
}

/// Failures raised by a store backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to open store session: {0}")]
    Connect(#[from] scylla::transport::errors::NewSessionError),

    #[error("Query failed: {0}")]
    Query(#[from] scylla::transport::errors::QueryError),

    #[error("Failed to decode rows: {0}")]
    Decode(String),

    #[error("Invalid null value for primary key column {0}")]
    NullPrimaryKey(&'static str),

    #[error("Key may not be empty: {0}")]
    EmptyPrimaryKey(&'static str),
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self {
            ServiceError::NotFound(message) | ServiceError::NotImplemented(message) => {
                (status, Json(MessageResponse { message })).into_response()
            }
            ServiceError::Store(err) => {
                // Driver details stay in the logs
                tracing::error!(error = %err, "store operation failed");
                let body = ErrorResponse {
                    error: status
                        .canonical_reason()
                        .unwrap_or("Unknown Error")
                        .to_string(),
                    message: "Internal server error".to_string(),
                    timestamp: chrono::Utc::now().to_rfc3339(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
