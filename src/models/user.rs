//! User and session models mirroring the auth backend's records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record as returned by the auth backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Profile fields stored in the auth backend's metadata blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl User {
    /// Display name or fallback to email.
    pub fn display(&self) -> &str {
        self.user_metadata
            .full_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.email.as_deref())
            .unwrap_or("unknown")
    }
}

/// An authenticated session: the backend's access token plus the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefers_full_name() {
        let user = User {
            id: "u1".into(),
            email: Some("dev@example.com".into()),
            user_metadata: UserMetadata {
                full_name: Some("Dev One".into()),
                avatar_url: None,
            },
            created_at: None,
            updated_at: None,
        };
        assert_eq!(user.display(), "Dev One");
    }

    #[test]
    fn test_display_falls_back_to_email() {
        let user = User {
            id: "u1".into(),
            email: Some("dev@example.com".into()),
            user_metadata: UserMetadata::default(),
            created_at: None,
            updated_at: None,
        };
        assert_eq!(user.display(), "dev@example.com");
    }
}
