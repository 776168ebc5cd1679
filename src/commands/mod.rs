//! REST Command Wrappers
//!
//! Frontend bindings to the Course Studio HTTP API, organized by domain.
//! Every wrapper returns `OrderResult` so the coordinator and the views
//! share one error type.

mod lesson;
mod module;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use lesson_order::{OrderError, OrderResult};

// Re-export all public items
pub use lesson::*;
pub use module::*;

/// Error body of every non-2xx API response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    pub kind: String,
    pub message: String,
}

/// Absolute URL of an API path; reqwest needs one in the browser
pub(crate) fn api_url(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|win| win.location().origin().ok())
        .unwrap_or_default();
    format!("{}/api{}", origin, path)
}

/// Map a failed response onto the coordinator's error kinds
pub fn classify(status: u16, body: Option<ApiErrorBody>) -> OrderError {
    let (kind, message) = match body {
        Some(body) => (body.kind, body.message),
        None => (String::new(), format!("HTTP {}", status)),
    };
    match (kind.as_str(), status) {
        ("validation", _) | (_, 400) | (_, 422) => OrderError::Validation(message),
        ("conflict", _) | (_, 409) => OrderError::Conflict(message),
        ("not_found", _) | (_, 404) => OrderError::NotFound(message),
        _ => OrderError::Transport(message),
    }
}

pub(crate) fn transport(err: reqwest::Error) -> OrderError {
    OrderError::Transport(err.to_string())
}

/// Decode a JSON body, or classify the error response
pub(crate) async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> OrderResult<T> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(transport);
    }
    let body = response.json::<ApiErrorBody>().await.ok();
    Err(classify(status.as_u16(), body))
}

/// Accept any 2xx, ignoring the body
pub(crate) async fn expect_success(response: reqwest::Response) -> OrderResult<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.json::<ApiErrorBody>().await.ok();
    Err(classify(status.as_u16(), body))
}
