//! Bearer-token authentication middleware.
//!
//! Resolves the `Authorization: Bearer <token>` header against the auth
//! backend and injects the resulting user into request extensions. Every
//! project-scoped route sits behind this; the per-route ownership check
//! happens in the handlers.

use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::Error;
use crate::AppState;

/// User context injected into request extensions after token validation.
#[derive(Clone, Debug)]
pub struct AuthUser {
    /// Vendor-side user identifier.
    pub id: String,
    /// User's email address (if available).
    pub email: Option<String>,
}

/// Extract a bearer token from request headers.
pub fn bearer_token(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Middleware that requires a valid access token.
///
/// Returns 401 Unauthorized when the header is missing or the auth backend
/// rejects the token.
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Error> {
    let token = bearer_token(req.headers()).ok_or(Error::Unauthenticated)?;

    let user = state.auth.get_user(&token).await?;

    req.extensions_mut().insert(AuthUser {
        id: user.id,
        email: user.email,
    });

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, HeaderValue};

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc123"),
        );
        assert_eq!(bearer_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn test_bearer_token_missing_or_malformed() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(bearer_token(&headers), None);
    }
}
