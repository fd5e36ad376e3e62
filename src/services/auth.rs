//! Auth client for the backend-as-a-service (GoTrue-compatible REST).
//!
//! Handles sign-up, sign-in, sign-out, password recovery, and profile
//! updates. All account state lives on the vendor side; this client only
//! forwards requests and reshapes responses.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde_json::{json, Value};
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{AuthSession, User};

/// Client for auth operations against the backend-as-a-service.
#[derive(Clone)]
pub struct AuthService {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl AuthService {
    /// Create a new auth client.
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("siteforge/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    /// Build headers with the project API key and a bearer token.
    /// The anon key doubles as the bearer for unauthenticated calls.
    fn build_headers(&self, bearer: Option<&str>) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        if let Ok(v) = self.anon_key.parse() {
            headers.insert("apikey", v);
        }
        let token = bearer.unwrap_or(&self.anon_key);
        if let Ok(v) = format!("Bearer {}", token).parse() {
            headers.insert(header::AUTHORIZATION, v);
        }
        headers
    }

    /// Register a new user with email and password.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<User> {
        let url = format!("{}/auth/v1/signup", self.base_url);

        let body = json!({
            "email": email,
            "password": password,
            "data": { "full_name": full_name.unwrap_or("") },
        });

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers(None))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Supabase(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Supabase(format!(
                "Sign-up failed {}: {}",
                status, text
            )));
        }

        // The backend returns either the bare user or a full session
        // depending on its email-confirmation setting.
        let value: Value = response
            .json()
            .await
            .map_err(|e| Error::Supabase(format!("Failed to parse response: {}", e)))?;

        let user_value = value.get("user").cloned().unwrap_or(value);
        let user: User = serde_json::from_value(user_value)
            .map_err(|e| Error::Supabase(format!("Unexpected sign-up payload: {}", e)))?;

        info!(user_id = %user.id, "Registered user");
        Ok(user)
    }

    /// Exchange email and password for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers(None))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| Error::Supabase(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(Error::InvalidCredentials);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Supabase(format!(
                "Sign-in failed {}: {}",
                status, text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Supabase(format!("Failed to parse response: {}", e)))
    }

    /// Revoke the session behind an access token.
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let url = format!("{}/auth/v1/logout", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers(Some(access_token)))
            .send()
            .await
            .map_err(|e| Error::Supabase(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Supabase(format!(
                "Sign-out failed {}: {}",
                status, text
            )));
        }

        Ok(())
    }

    /// Resolve the user behind an access token.
    pub async fn get_user(&self, access_token: &str) -> Result<User> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(Some(access_token)))
            .send()
            .await
            .map_err(|e| Error::Supabase(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Unauthenticated);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Supabase(format!(
                "User lookup failed {}: {}",
                status, text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Supabase(format!("Failed to parse response: {}", e)))
    }

    /// Send a password recovery email.
    pub async fn reset_password(&self, email: &str) -> Result<()> {
        let url = format!("{}/auth/v1/recover", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers(None))
            .json(&json!({ "email": email }))
            .send()
            .await
            .map_err(|e| Error::Supabase(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Supabase(format!(
                "Password recovery failed {}: {}",
                status, text
            )));
        }

        Ok(())
    }

    /// Change the current user's password.
    pub async fn update_password(&self, access_token: &str, new_password: &str) -> Result<User> {
        self.update_user(access_token, json!({ "password": new_password }))
            .await
    }

    /// Update the current user's profile metadata.
    pub async fn update_profile(
        &self,
        access_token: &str,
        full_name: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<User> {
        self.update_user(
            access_token,
            json!({
                "data": {
                    "full_name": full_name,
                    "avatar_url": avatar_url,
                }
            }),
        )
        .await
    }

    async fn update_user(&self, access_token: &str, body: Value) -> Result<User> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .client
            .put(&url)
            .headers(self.build_headers(Some(access_token)))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Supabase(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Supabase(format!(
                "User update failed {}: {}",
                status, text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Supabase(format!("Failed to parse response: {}", e)))
    }
}
