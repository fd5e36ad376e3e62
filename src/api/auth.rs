//! Authentication routes.
//!
//! Routes:
//! - POST /auth/register - Create an account
//! - POST /auth/login - Exchange credentials for a session
//! - POST /auth/logout - Revoke the current session

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::middleware::bearer_token;
use crate::models::{AuthSession, User};
use crate::{AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest {
    email: Option<String>,
    password: Option<String>,
    full_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct UserResponse {
    user: User,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct LogoutResponse {
    success: bool,
}

/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let email = body
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| Error::Validation("Email and password are required".to_string()))?;
    let password = body
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| Error::Validation("Email and password are required".to_string()))?;

    let user = state
        .auth
        .sign_up(&email, &password, body.full_name.as_deref())
        .await?;

    info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthSession>> {
    let email = body
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| Error::Validation("Email and password are required".to_string()))?;
    let password = body
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| Error::Validation("Email and password are required".to_string()))?;

    let session = state.auth.sign_in(&email, &password).await?;
    Ok(Json(session))
}

/// POST /auth/logout
async fn logout(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<Json<LogoutResponse>> {
    let token = bearer_token(&headers).ok_or(Error::Unauthenticated)?;
    state.auth.sign_out(&token).await?;
    Ok(Json(LogoutResponse { success: true }))
}
