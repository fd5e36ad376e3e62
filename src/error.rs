//! Error types for siteforge.
//!
//! Uses thiserror for ergonomic error definitions that integrate
//! with axum's response system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Auth errors
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("Resource not found: {0}")]
    NotFound(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // External service errors
    #[error("Supabase error: {0}")]
    Supabase(String),

    #[error("GitHub API error: {0}")]
    GitHub(String),

    #[error("Netlify API error: {0}")]
    Netlify(String),

    #[error("LLM error: {0}")]
    Llm(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 401
            Self::Unauthenticated | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,

            // 403
            Self::Forbidden => StatusCode::FORBIDDEN,

            // 404
            Self::NotFound(_) => StatusCode::NOT_FOUND,

            // 400
            Self::Validation(_) | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,

            // 502
            Self::Supabase(_) | Self::GitHub(_) | Self::Netlify(_) | Self::Llm(_) => {
                StatusCode::BAD_GATEWAY
            }

            // 500
            Self::Internal(_) | Self::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Supabase(_) => "SUPABASE_ERROR",
            Self::GitHub(_) => "GITHUB_ERROR",
            Self::Netlify(_) => "NETLIFY_ERROR",
            Self::Llm(_) => "LLM_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Other(_) => "UNKNOWN_ERROR",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let message = self.to_string();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Internal(format!("HTTP request failed: {}", err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidInput(format!("JSON parsing error: {}", err))
    }
}
