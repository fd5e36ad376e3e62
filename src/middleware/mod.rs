//! Middleware for siteforge.

mod user_auth;

pub use user_auth::{bearer_token, require_user, AuthUser};
