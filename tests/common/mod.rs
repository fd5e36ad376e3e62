//! Shared test harness: configuration pointed at stand-in vendor servers
//! and a fully wired router.

#![allow(dead_code)]

use axum::Router;
use siteforge::config::{
    Config, GitHubConfig, LlmConfig, NetlifyConfig, ServerConfig, SupabaseConfig,
};
use siteforge::{api, AppState};

/// Build a config with every vendor pointed at the given base URLs.
pub fn test_config(supabase: &str, github: &str, netlify: &str, llm: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        supabase: SupabaseConfig {
            url: supabase.to_string(),
            anon_key: "test-anon-key".to_string(),
        },
        github: GitHubConfig {
            api_url: github.to_string(),
            token: Some("test-github-token".to_string()),
        },
        netlify: NetlifyConfig {
            api_url: netlify.to_string(),
            token: Some("test-netlify-token".to_string()),
        },
        llm: LlmConfig {
            api_url: llm.to_string(),
            api_key: Some("test-llm-key".to_string()),
            model: "gpt-4".to_string(),
            max_tokens: 4000,
        },
    }
}

/// Build the full application router against a config.
pub fn test_app(config: &Config) -> Router {
    let state = AppState::new(config);
    Router::new()
        .merge(api::routes(state.clone()))
        .with_state(state)
}

/// A user record as the auth backend would return it.
pub fn user_json(id: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "email": email,
        "user_metadata": { "full_name": "Test User" },
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}

/// A project row as the relational backend would return it.
pub fn project_json(id: &str, user_id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": "demo-site",
        "description": "A demo project",
        "user_id": user_id,
        "status": "draft",
        "repository_url": null,
        "deployment_url": null,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-02T00:00:00Z"
    })
}
