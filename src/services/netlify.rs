//! Netlify client for site and deploy operations.
//!
//! Provides API access to Netlify for:
//! - Site CRUD
//! - Deploys and deploy cancellation
//! - Deploy keys and build hooks
//! - Form submissions

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::error::{Error, Result};

/// Build settings attached to a site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSettings {
    #[serde(default)]
    pub cmd: Option<String>,
    #[serde(default)]
    pub dir: Option<String>,
    #[serde(default)]
    pub env: Option<Value>,
}

/// A site as exposed to gateway clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    pub url: String,
    pub admin_url: Option<String>,
    pub screenshot_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub build_settings: Option<BuildSettings>,
}

/// A deploy as exposed to gateway clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deploy {
    pub id: String,
    pub site_id: String,
    pub status: Option<String>,
    pub deploy_url: Option<String>,
    pub screenshot_url: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub branch: Option<String>,
    pub commit_ref: Option<String>,
    pub commit_url: Option<String>,
    pub error_message: Option<String>,
}

/// A deploy key used to wire up repository access.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployKey {
    pub id: String,
    pub public_key: String,
}

/// A build hook attached to a site.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildHook {
    pub id: String,
    pub site_id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub branch: Option<String>,
}

/// A form submission captured by a site.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmission {
    pub id: String,
    pub site_id: String,
    pub form_id: String,
    pub created_at: Option<String>,
    pub data: Option<Value>,
}

/// Linked repository settings for a site.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoSettings {
    pub provider: String,
    pub repo: String,
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default)]
    pub branch: Option<String>,
}

/// Options when creating or updating a site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteOptions {
    pub name: Option<String>,
    pub custom_domain: Option<String>,
    pub account_slug: Option<String>,
    pub repo: Option<RepoSettings>,
    pub build_settings: Option<BuildSettings>,
}

/// Options when creating a deploy.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployOptions {
    pub title: Option<String>,
    pub branch: Option<String>,
    pub deploy_dir: Option<String>,
    pub functions_dir: Option<String>,
    pub draft: Option<bool>,
    pub message: Option<String>,
}

// ----------------------------------------------------------------------
// Vendor wire shapes
// ----------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SiteWire {
    id: String,
    name: String,
    url: String,
    admin_url: Option<String>,
    screenshot_url: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
    build_settings: Option<BuildSettings>,
}

impl From<SiteWire> for Site {
    fn from(site: SiteWire) -> Self {
        Site {
            id: site.id,
            name: site.name,
            url: site.url,
            admin_url: site.admin_url,
            screenshot_url: site.screenshot_url,
            created_at: site.created_at,
            updated_at: site.updated_at,
            build_settings: site.build_settings,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeployWire {
    id: String,
    site_id: String,
    state: Option<String>,
    deploy_url: Option<String>,
    url: Option<String>,
    screenshot_url: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
    branch: Option<String>,
    commit_ref: Option<String>,
    commit_url: Option<String>,
    error_message: Option<String>,
}

impl From<DeployWire> for Deploy {
    fn from(deploy: DeployWire) -> Self {
        Deploy {
            id: deploy.id,
            site_id: deploy.site_id,
            status: deploy.state,
            deploy_url: deploy.deploy_url.or(deploy.url),
            screenshot_url: deploy.screenshot_url,
            created_at: deploy.created_at,
            updated_at: deploy.updated_at,
            branch: deploy.branch,
            commit_ref: deploy.commit_ref,
            commit_url: deploy.commit_url,
            error_message: deploy.error_message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeployKeyWire {
    id: String,
    public_key: String,
}

#[derive(Debug, Deserialize)]
struct BuildHookWire {
    id: String,
    site_id: String,
    title: Option<String>,
    url: Option<String>,
    branch: Option<String>,
}

impl From<BuildHookWire> for BuildHook {
    fn from(hook: BuildHookWire) -> Self {
        BuildHook {
            id: hook.id,
            site_id: hook.site_id,
            title: hook.title,
            url: hook.url,
            branch: hook.branch,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FormSubmissionWire {
    id: String,
    site_id: String,
    form_id: String,
    created_at: Option<String>,
    data: Option<Value>,
}

/// Client for Netlify API operations.
#[derive(Clone)]
pub struct NetlifyService {
    client: Client,
    api_url: String,
}

impl NetlifyService {
    /// Create a new Netlify client.
    pub fn new(api_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("siteforge/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn build_headers(&self, token: &str) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        if let Ok(v) = format!("Bearer {}", token).parse() {
            headers.insert(header::AUTHORIZATION, v);
        }
        headers
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Err(Error::NotFound("Netlify resource".to_string()));
            }
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Netlify(format!(
                "Netlify API error {}: {}",
                status, text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Netlify(format!("Failed to parse response: {}", e)))
    }

    fn site_payload(options: &SiteOptions) -> Value {
        json!({
            "name": options.name,
            "custom_domain": options.custom_domain,
            "account_slug": options.account_slug,
            "repo": options.repo.as_ref().map(|r| json!({
                "provider": r.provider,
                "repo": r.repo,
                "private": r.private,
                "branch": r.branch,
            })),
            "build_settings": options.build_settings.as_ref().map(|b| json!({
                "cmd": b.cmd,
                "dir": b.dir,
                "env": b.env,
            })),
        })
    }

    // ------------------------------------------------------------------
    // Sites
    // ------------------------------------------------------------------

    /// List all sites for the authenticated account.
    pub async fn list_sites(&self, token: &str) -> Result<Vec<Site>> {
        let url = format!("{}/sites", self.api_url);

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        let sites: Vec<SiteWire> = Self::read_json(response).await?;
        Ok(sites.into_iter().map(Site::from).collect())
    }

    /// Get a site by id.
    pub async fn get_site(&self, site_id: &str, token: &str) -> Result<Site> {
        let url = format!("{}/sites/{}", self.api_url, site_id);

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        let site: SiteWire = Self::read_json(response).await?;
        Ok(site.into())
    }

    /// Create a new site.
    pub async fn create_site(&self, options: &SiteOptions, token: &str) -> Result<Site> {
        let url = format!("{}/sites", self.api_url);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers(token))
            .json(&Self::site_payload(options))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        let site: SiteWire = Self::read_json(response).await?;
        info!(site_id = %site.id, name = %site.name, "Created site");
        Ok(site.into())
    }

    /// Update a site.
    pub async fn update_site(
        &self,
        site_id: &str,
        options: &SiteOptions,
        token: &str,
    ) -> Result<Site> {
        let url = format!("{}/sites/{}", self.api_url, site_id);

        let response = self
            .client
            .patch(&url)
            .headers(self.build_headers(token))
            .json(&Self::site_payload(options))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        let site: SiteWire = Self::read_json(response).await?;
        Ok(site.into())
    }

    /// Delete a site.
    pub async fn delete_site(&self, site_id: &str, token: &str) -> Result<()> {
        let url = format!("{}/sites/{}", self.api_url, site_id);

        let response = self
            .client
            .delete(&url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Netlify(format!(
                "Netlify API error {}: {}",
                status, text
            )));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Deploys
    // ------------------------------------------------------------------

    /// List deploys for a site, newest first.
    pub async fn list_deploys(&self, site_id: &str, token: &str) -> Result<Vec<Deploy>> {
        let url = format!("{}/sites/{}/deploys", self.api_url, site_id);

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        let deploys: Vec<DeployWire> = Self::read_json(response).await?;
        Ok(deploys.into_iter().map(Deploy::from).collect())
    }

    /// Get a deploy by id.
    pub async fn get_deploy(&self, site_id: &str, deploy_id: &str, token: &str) -> Result<Deploy> {
        let url = format!("{}/sites/{}/deploys/{}", self.api_url, site_id, deploy_id);

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        let deploy: DeployWire = Self::read_json(response).await?;
        Ok(deploy.into())
    }

    /// Create a deploy for a site.
    pub async fn create_deploy(
        &self,
        site_id: &str,
        options: &DeployOptions,
        token: &str,
    ) -> Result<Deploy> {
        let url = format!("{}/sites/{}/deploys", self.api_url, site_id);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers(token))
            .json(&json!({
                "title": options.title,
                "branch": options.branch,
                "deploy_dir": options.deploy_dir,
                "functions_dir": options.functions_dir,
                "draft": options.draft,
                "message": options.message,
            }))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        let deploy: DeployWire = Self::read_json(response).await?;
        info!(site_id, deploy_id = %deploy.id, "Created deploy");
        Ok(deploy.into())
    }

    /// Cancel an in-flight deploy.
    pub async fn cancel_deploy(&self, site_id: &str, deploy_id: &str, token: &str) -> Result<()> {
        let url = format!(
            "{}/sites/{}/deploys/{}/cancel",
            self.api_url, site_id, deploy_id
        );

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Netlify(format!(
                "Netlify API error {}: {}",
                status, text
            )));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Keys, hooks, forms
    // ------------------------------------------------------------------

    /// Create a deploy key for wiring up repository access.
    pub async fn create_deploy_key(&self, token: &str) -> Result<DeployKey> {
        let url = format!("{}/deploy_keys", self.api_url);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        let key: DeployKeyWire = Self::read_json(response).await?;
        Ok(DeployKey {
            id: key.id,
            public_key: key.public_key,
        })
    }

    /// Create a build hook on a site.
    pub async fn create_build_hook(
        &self,
        site_id: &str,
        title: &str,
        branch: Option<&str>,
        token: &str,
    ) -> Result<BuildHook> {
        let url = format!("{}/sites/{}/build_hooks", self.api_url, site_id);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers(token))
            .json(&json!({ "title": title, "branch": branch }))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        let hook: BuildHookWire = Self::read_json(response).await?;
        Ok(hook.into())
    }

    /// List build hooks on a site.
    pub async fn list_build_hooks(&self, site_id: &str, token: &str) -> Result<Vec<BuildHook>> {
        let url = format!("{}/sites/{}/build_hooks", self.api_url, site_id);

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        let hooks: Vec<BuildHookWire> = Self::read_json(response).await?;
        Ok(hooks.into_iter().map(BuildHook::from).collect())
    }

    /// Trigger a build hook.
    pub async fn trigger_build_hook(&self, hook_id: &str, token: &str) -> Result<()> {
        let url = format!("{}/hooks/{}", self.api_url, hook_id);

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Netlify(format!(
                "Netlify API error {}: {}",
                status, text
            )));
        }

        Ok(())
    }

    /// List form submissions for a site's form.
    pub async fn list_form_submissions(
        &self,
        site_id: &str,
        form_id: &str,
        token: &str,
    ) -> Result<Vec<FormSubmission>> {
        let url = format!(
            "{}/sites/{}/forms/{}/submissions",
            self.api_url, site_id, form_id
        );

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers(token))
            .send()
            .await
            .map_err(|e| Error::Netlify(format!("Request failed: {}", e)))?;

        let submissions: Vec<FormSubmissionWire> = Self::read_json(response).await?;
        Ok(submissions
            .into_iter()
            .map(|s| FormSubmission {
                id: s.id,
                site_id: s.site_id,
                form_id: s.form_id,
                created_at: s.created_at,
                data: s.data,
            })
            .collect())
    }

    // ------------------------------------------------------------------
    // Deployment compositions
    // ------------------------------------------------------------------

    /// Create a site for a project, optionally linked to a repository.
    pub async fn create_site_for_project(
        &self,
        project_name: &str,
        build_command: Option<&str>,
        publish_dir: Option<&str>,
        repo: Option<RepoSettings>,
        token: &str,
    ) -> Result<Site> {
        let options = SiteOptions {
            name: Some(project_name.to_string()),
            custom_domain: None,
            account_slug: None,
            repo,
            build_settings: Some(BuildSettings {
                cmd: build_command.map(str::to_string),
                dir: publish_dir.map(str::to_string),
                env: None,
            }),
        };

        self.create_site(&options, token).await
    }

    /// Wire a site to a repository for continuous deployment: update the
    /// site's repo and build settings, then attach a build hook.
    pub async fn setup_continuous_deployment(
        &self,
        site_id: &str,
        repo: RepoSettings,
        build_command: Option<&str>,
        publish_dir: Option<&str>,
        token: &str,
    ) -> Result<BuildHook> {
        let branch = repo.branch.clone();

        let options = SiteOptions {
            name: None,
            custom_domain: None,
            account_slug: None,
            repo: Some(repo),
            build_settings: Some(BuildSettings {
                cmd: build_command.map(str::to_string),
                dir: publish_dir.map(str::to_string),
                env: None,
            }),
        };
        self.update_site(site_id, &options, token).await?;

        self.create_build_hook(site_id, "Continuous deployment", branch.as_deref(), token)
            .await
    }

    /// Create a deploy from an uploaded directory and return its URL.
    /// Draft deploys get a preview URL; non-draft deploys go to production.
    pub async fn deploy_site(
        &self,
        site_id: &str,
        deploy_dir: &str,
        message: &str,
        draft: bool,
        token: &str,
    ) -> Result<String> {
        let options = DeployOptions {
            title: Some(message.to_string()),
            branch: None,
            deploy_dir: Some(deploy_dir.to_string()),
            functions_dir: None,
            draft: Some(draft),
            message: Some(message.to_string()),
        };

        let deploy = self.create_deploy(site_id, &options, token).await?;
        deploy
            .deploy_url
            .ok_or_else(|| Error::Netlify("Deploy response had no URL".to_string()))
    }
}
