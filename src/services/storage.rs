//! Object storage client for the backend-as-a-service (Storage REST).
//!
//! Bucket management and file upload/download/list/remove. Buckets for
//! project assets and user avatars are ensured at startup.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Bucket holding generated site assets.
pub const ASSETS_BUCKET: &str = "project-assets";
/// Bucket holding user avatars.
pub const AVATARS_BUCKET: &str = "user-avatars";

/// An object listed within a bucket.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageObject {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Client for object storage operations against the backend-as-a-service.
#[derive(Clone)]
pub struct StorageService {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl StorageService {
    /// Create a new storage client.
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

    fn build_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        if let Ok(v) = self.anon_key.parse() {
            headers.insert("apikey", v);
        }
        if let Ok(v) = format!("Bearer {}", self.anon_key).parse() {
            headers.insert(header::AUTHORIZATION, v);
        }
        headers
    }

    /// Create a bucket. An already-existing bucket is not an error.
    pub async fn create_bucket(&self, name: &str, public: bool) -> Result<()> {
        let url = format!("{}/storage/v1/bucket", self.base_url);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers())
            .json(&json!({ "id": name, "name": name, "public": public }))
            .send()
            .await
            .map_err(|e| Error::Supabase(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::CONFLICT {
            return Ok(());
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Supabase(format!(
                "Bucket creation failed {}: {}",
                status, text
            )));
        }

        info!(bucket = name, "Created storage bucket");
        Ok(())
    }

    /// Ensure the buckets this service writes to exist. Best-effort: a
    /// failure is logged, not fatal, since uploads surface their own errors.
    pub async fn ensure_buckets(&self) {
        for (bucket, public) in [(ASSETS_BUCKET, true), (AVATARS_BUCKET, true)] {
            if let Err(e) = self.create_bucket(bucket, public).await {
                warn!(bucket, error = %e, "Could not ensure storage bucket");
            }
        }
    }

    /// Upload a file, overwriting any existing object, and return its
    /// public URL.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            bucket,
            encode_path(path)
        );

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers())
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, "3600")
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(|e| Error::Supabase(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Supabase(format!(
                "Upload failed {}: {}",
                status, text
            )));
        }

        Ok(self.public_url(bucket, path))
    }

    /// Download an object's bytes.
    pub async fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            bucket,
            encode_path(path)
        );

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers())
            .send()
            .await
            .map_err(|e| Error::Supabase(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("object {}/{}", bucket, path)));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Supabase(format!(
                "Download failed {}: {}",
                status, text
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Supabase(format!("Failed to read body: {}", e)))?;
        Ok(bytes.to_vec())
    }

    /// List objects under a prefix.
    pub async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<StorageObject>> {
        let url = format!("{}/storage/v1/object/list/{}", self.base_url, bucket);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers())
            .json(&json!({ "prefix": prefix, "limit": 100, "offset": 0 }))
            .send()
            .await
            .map_err(|e| Error::Supabase(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Supabase(format!(
                "Listing failed {}: {}",
                status, text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Supabase(format!("Failed to parse response: {}", e)))
    }

    /// Remove objects by path.
    pub async fn remove(&self, bucket: &str, paths: &[String]) -> Result<()> {
        let url = format!("{}/storage/v1/object/{}", self.base_url, bucket);

        let response = self
            .client
            .delete(&url)
            .headers(self.build_headers())
            .json(&json!({ "prefixes": paths }))
            .send()
            .await
            .map_err(|e| Error::Supabase(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Supabase(format!(
                "Removal failed {}: {}",
                status, text
            )));
        }

        Ok(())
    }

    /// Public URL for an object in a public bucket.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            bucket,
            encode_path(path)
        )
    }
}

/// Percent-encode an object path, keeping `/` separators intact.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(encode_path("a/b c/d.png"), "a/b%20c/d.png");
    }

    #[test]
    fn test_public_url() {
        let storage = StorageService::new("http://localhost:54321/", "key");
        assert_eq!(
            storage.public_url(ASSETS_BUCKET, "p1/logo.png"),
            "http://localhost:54321/storage/v1/object/public/project-assets/p1/logo.png"
        );
    }
}
