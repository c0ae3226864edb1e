use thiserror::Error;

/// Errors from parsing and normalizing a requested source URL.
#[derive(Debug, Clone, Error)]
pub enum UrlError {
    #[error("malformed source url '{input}': {reason}")]
    Malformed { input: String, reason: String },
}

/// Errors from invoking the external media resolver.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("failed to launch resolver: {0}")]
    Launch(String),
    #[error("resolver exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },
    #[error("resolver output is not a valid media document: {0}")]
    InvalidOutput(String),
    #[error("resolver timed out after {0}s")]
    Timeout(u64),
}

/// Errors from picking a playable format out of a media document.
#[derive(Debug, Clone, Error)]
pub enum SelectError {
    #[error("no format available")]
    NoFormatAvailable,
}
