//! Configuration management for siteforge.
//!
//! Loads configuration from environment variables: server binding plus one
//! section per vendor (Supabase, GitHub, Netlify, LLM completion API).

use std::env;
use std::sync::OnceLock;

/// Global configuration instance
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Get the global configuration
pub fn config() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}

/// Initialize configuration (call once at startup)
pub fn init() -> &'static Config {
    config()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub supabase: SupabaseConfig,
    pub github: GitHubConfig,
    pub netlify: NetlifyConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone)]
pub struct GitHubConfig {
    pub api_url: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NetlifyConfig {
    pub api_url: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig {
                host: env_or("HOST", "0.0.0.0"),
                port: env_or("PORT", "8080").parse().expect("Invalid PORT"),
            },
            supabase: SupabaseConfig {
                url: env_or("SUPABASE_URL", "http://localhost:54321"),
                anon_key: env_or("SUPABASE_ANON_KEY", ""),
            },
            github: GitHubConfig {
                api_url: env_or("GITHUB_API_URL", "https://api.github.com"),
                token: env::var("GITHUB_TOKEN").ok(),
            },
            netlify: NetlifyConfig {
                api_url: env_or("NETLIFY_API_URL", "https://api.netlify.com/api/v1"),
                token: env::var("NETLIFY_TOKEN").ok(),
            },
            llm: LlmConfig {
                api_url: env_or("LLM_API_URL", "https://api.openai.com/v1"),
                api_key: env::var("LLM_API_KEY").ok(),
                model: env_or("LLM_MODEL", "gpt-4"),
                max_tokens: env_or("LLM_MAX_TOKENS", "4000").parse().unwrap_or(4000),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back() {
        assert_eq!(env_or("SITEFORGE_DOES_NOT_EXIST", "fallback"), "fallback");
    }

    #[test]
    fn test_from_env_defaults() {
        let config = Config::from_env();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.netlify.api_url, "https://api.netlify.com/api/v1");
        assert_eq!(config.llm.model, "gpt-4");
    }
}
