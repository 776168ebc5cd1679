//! API Error Responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// JSON body of every non-2xx response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// "validation" | "conflict" | "not_found" | "internal"
    pub kind: String,
    pub message: String,
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            DomainError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, "validation", msg),
            DomainError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            DomainError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            DomainError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg)
            }
        };
        let body = ApiErrorBody {
            kind: kind.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
