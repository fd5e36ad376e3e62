//! Completion client for the model API.
//!
//! Thin wrapper over an OpenAI-compatible `/chat/completions` endpoint.
//! One call per operation, no fallback or retry: a failed call surfaces as
//! an error, an unparsable reply is handled by the caller's default object.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Client for model completion calls.
#[derive(Clone)]
pub struct LlmService {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl LlmService {
    /// Create a new completion client.
    pub fn new(api_url: &str, api_key: Option<&str>, model: &str, max_tokens: u32) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
            model: model.to_string(),
            max_tokens,
        }
    }

    /// Complete a system + user prompt pair and return the reply text.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Llm("No API key configured".to_string()))?;

        let url = format!("{}/chat/completions", self.api_url);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "max_tokens": self.max_tokens,
            "temperature": 0.1,
        });

        debug!(model = %self.model, "Calling model API");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Llm(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Llm(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::Llm(format!("Model API returned {}: {}", status, text)));
        }

        let parsed: CompletionResponse = serde_json::from_str(&text)
            .map_err(|e| Error::Llm(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = parsed.error {
            return Err(Error::Llm(error.message));
        }

        parsed
            .choices
            .and_then(|choices| choices.into_iter().next())
            .and_then(|choice| choice.message)
            .map(|message| message.content)
            .ok_or_else(|| Error::Llm("No content in model response".to_string()))
    }

    /// Extract a JSON object from free-form reply text.
    ///
    /// Tries a ```json fenced block, then any fenced block, then a
    /// brace-balanced raw object. Returns None when nothing parses.
    pub fn extract_json(text: &str) -> Option<Value> {
        // Try to find JSON in code blocks
        if let Some(start) = text.find("```json") {
            let start = start + 7;
            if let Some(end) = text[start..].find("```") {
                if let Ok(json) = serde_json::from_str(&text[start..start + end]) {
                    return Some(json);
                }
            }
        }

        // Try to find JSON in generic code blocks
        if let Some(start) = text.find("```") {
            let start = start + 3;
            // Skip language identifier if present
            let start = text[start..]
                .find('\n')
                .map(|i| start + i + 1)
                .unwrap_or(start);
            if let Some(end) = text[start..].find("```") {
                if let Ok(json) = serde_json::from_str(&text[start..start + end]) {
                    return Some(json);
                }
            }
        }

        // Try to find raw JSON object
        if let Some(start) = text.find('{') {
            // Find matching closing brace
            let mut depth = 0;
            let mut end = start;
            for (i, c) in text[start..].char_indices() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            end = start + i + 1;
                            break;
                        }
                    }
                    _ => {}
                }
            }
            if end > start {
                if let Ok(json) = serde_json::from_str(&text[start..end]) {
                    return Some(json);
                }
            }
        }

        None
    }
}
