//! Application state for siteforge.
//!
//! One client handle per vendor, shared across handlers. Handles are
//! dependency-injected here rather than reached through globals so tests
//! can point each client at a stand-in server.

use std::sync::Arc;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::services::{
    AssistService, AuthService, DatabaseService, GitHubService, LlmService, NetlifyService,
    PlannerService, StorageService,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Auth client (backend-as-a-service).
    pub auth: Arc<AuthService>,
    /// Table client (backend-as-a-service).
    pub db: Arc<DatabaseService>,
    /// Object storage client (backend-as-a-service).
    pub storage: Arc<StorageService>,
    /// GitHub API client.
    pub github: Arc<GitHubService>,
    /// Netlify API client.
    pub netlify: Arc<NetlifyService>,
    /// LLM-backed code assistant.
    pub assist: Arc<AssistService>,
    /// Simulated project planner.
    pub planner: Arc<PlannerService>,
    /// Fallback GitHub token for requests that carry none.
    pub github_token: Option<String>,
    /// Fallback Netlify token for requests that carry none.
    pub netlify_token: Option<String>,
}

impl AppState {
    /// Build application state from configuration.
    pub fn new(config: &Config) -> Self {
        let llm = Arc::new(LlmService::new(
            &config.llm.api_url,
            config.llm.api_key.as_deref(),
            &config.llm.model,
            config.llm.max_tokens,
        ));

        Self {
            auth: Arc::new(AuthService::new(
                &config.supabase.url,
                &config.supabase.anon_key,
            )),
            db: Arc::new(DatabaseService::new(
                &config.supabase.url,
                &config.supabase.anon_key,
            )),
            storage: Arc::new(StorageService::new(
                &config.supabase.url,
                &config.supabase.anon_key,
            )),
            github: Arc::new(GitHubService::new(&config.github.api_url)),
            netlify: Arc::new(NetlifyService::new(&config.netlify.api_url)),
            assist: Arc::new(AssistService::new(llm)),
            planner: Arc::new(PlannerService::new()),
            github_token: config.github.token.clone(),
            netlify_token: config.netlify.token.clone(),
        }
    }

    /// Resolve a GitHub token: per-request override or configured fallback.
    pub fn resolve_github_token(&self, override_token: Option<&str>) -> Result<String> {
        override_token
            .map(str::to_string)
            .or_else(|| self.github_token.clone())
            .ok_or(Error::Unauthenticated)
    }

    /// Resolve a Netlify token: per-request override or configured fallback.
    pub fn resolve_netlify_token(&self, override_token: Option<&str>) -> Result<String> {
        override_token
            .map(str::to_string)
            .or_else(|| self.netlify_token.clone())
            .ok_or(Error::Unauthenticated)
    }
}
