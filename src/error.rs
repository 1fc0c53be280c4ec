use axum::{
    response::{IntoResponse, Response},
    Json,
    http::StatusCode,
};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorResponse { error: error.into() }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// GitHub answered with a status outside the 2xx range.
    #[error("GitHub API: {status}")]
    Remote { status: u16 },

    #[error("Failed to reach GitHub: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Output directory {0} does not exist; build the static site first")]
    MissingOutputDir(std::path::PathBuf),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Coarse classification of an upstream failure, used only to pick the
/// status code and message shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    Auth,
    RateLimitOrAccess,
    Other,
}

impl AppError {
    pub fn upstream_kind(&self) -> UpstreamKind {
        match self {
            AppError::Remote { status: 401 } => UpstreamKind::Auth,
            AppError::Remote { status: 403 } => UpstreamKind::RateLimitOrAccess,
            _ => UpstreamKind::Other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.upstream_kind() {
            UpstreamKind::Auth => (
                StatusCode::UNAUTHORIZED,
                "GitHub token is invalid or expired. Update GITHUB_TOKEN.",
            ),
            UpstreamKind::RateLimitOrAccess => (
                StatusCode::FORBIDDEN,
                "GitHub rate limit exceeded or access denied.",
            ),
            UpstreamKind::Other => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load projects."),
        };

        (status, Json(ErrorResponse::new(error_message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
