use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use questube_core::UrlError;
use thiserror::Error;

/// Rejections the redirect endpoint can answer with directly. Everything
/// else degrades into a redirect back to the source page instead.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("bad request: {0}")]
    BadRequest(#[from] UrlError),
    #[error("not found")]
    NotFound,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad Request").into_response(),
            GatewayError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        }
    }
}
