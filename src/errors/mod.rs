/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Error taxonomy for the dashboard pipeline. No variant is fatal to a
/// page; every failure path renders something interactive.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network or decode failure: {0}")]
    NetworkOrDecode(String),
    #[error("missing required data: {0}")]
    MissingRequiredData(String),
    #[error("sharing unavailable: {0}")]
    ShareUnavailable(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::NetworkOrDecode(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Failed pages still carry the navigation affordances, so the
        // error indicator never strands the user.
        let page = crate::render::error_page(&self.to_string());
        (StatusCode::OK, Html(page)).into_response()
    }
}

/// Type alias for pipeline results
pub type ApiResult<T> = Result<T, ApiError>;
