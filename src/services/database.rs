//! Table client for the backend-as-a-service (PostgREST-compatible REST).
//!
//! CRUD pass-through for the `projects`, `components`, and `deployments`
//! tables. Rows, constraints, and cascades live on the vendor side.

use std::time::Duration;

use reqwest::{header, Client, Method};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Component, Deployment, Project, ProjectStatus};

/// Fields accepted when updating a project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_url: Option<String>,
}

/// Fields accepted when updating a component.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ComponentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// Fields accepted when updating a deployment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeploymentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deploy_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Client for table operations against the backend-as-a-service.
#[derive(Clone)]
pub struct DatabaseService {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl DatabaseService {
    /// Create a new table client.
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

    /// Issue a request against a table endpoint and return the raw response.
    async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<serde_json::Value>,
        returning: bool,
    ) -> Result<reqwest::Response> {
        let url = format!("{}/rest/v1/{}", self.base_url, path_and_query);

        let mut request = self.client.request(method, &url).headers(self.build_headers());
        if returning {
            request = request.header("Prefer", "return=representation");
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Supabase(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Supabase(format!(
                "Table request failed {}: {}",
                status, text
            )));
        }

        Ok(response)
    }

    /// Parse a PostgREST row-set response, expecting exactly one row.
    async fn single_row<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        entity: &str,
    ) -> Result<T> {
        let mut rows: Vec<T> = response
            .json()
            .await
            .map_err(|e| Error::Supabase(format!("Failed to parse response: {}", e)))?;

        if rows.is_empty() {
            return Err(Error::NotFound(entity.to_string()));
        }
        Ok(rows.remove(0))
    }

    // ------------------------------------------------------------------
    // Projects
    // ------------------------------------------------------------------

    /// Insert a new project with status `draft`.
    pub async fn create_project(
        &self,
        name: &str,
        description: &str,
        user_id: &str,
    ) -> Result<Project> {
        let body = json!([{
            "name": name,
            "description": description,
            "user_id": user_id,
            "status": ProjectStatus::Draft.as_str(),
        }]);

        let response = self
            .request(Method::POST, "projects", Some(body), true)
            .await?;
        let project: Project = Self::single_row(response, "project").await?;

        info!(project_id = %project.id, "Created project");
        Ok(project)
    }

    /// Fetch a project by id.
    pub async fn get_project(&self, project_id: &str) -> Result<Project> {
        let query = format!(
            "projects?id=eq.{}&select=*",
            urlencoding::encode(project_id)
        );
        let response = self.request(Method::GET, &query, None, false).await?;
        Self::single_row(response, &format!("project {}", project_id)).await
    }

    /// List a user's projects, most recently updated first.
    pub async fn list_user_projects(&self, user_id: &str) -> Result<Vec<Project>> {
        let query = format!(
            "projects?user_id=eq.{}&select=*&order=updated_at.desc",
            urlencoding::encode(user_id)
        );
        let response = self.request(Method::GET, &query, None, false).await?;

        response
            .json()
            .await
            .map_err(|e| Error::Supabase(format!("Failed to parse response: {}", e)))
    }

    /// Apply a partial update to a project.
    pub async fn update_project(&self, project_id: &str, updates: ProjectUpdate) -> Result<Project> {
        let query = format!("projects?id=eq.{}", urlencoding::encode(project_id));
        let body = serde_json::to_value(&updates)?;
        let response = self.request(Method::PATCH, &query, Some(body), true).await?;
        Self::single_row(response, &format!("project {}", project_id)).await
    }

    /// Delete a project row.
    pub async fn delete_project(&self, project_id: &str) -> Result<()> {
        let query = format!("projects?id=eq.{}", urlencoding::encode(project_id));
        self.request(Method::DELETE, &query, None, false).await?;
        info!(project_id = %project_id, "Deleted project");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    /// Insert a new component for a project.
    pub async fn create_component(
        &self,
        project_id: &str,
        name: &str,
        kind: &str,
        code: &str,
        file_path: &str,
    ) -> Result<Component> {
        let body = json!([{
            "project_id": project_id,
            "name": name,
            "type": kind,
            "code": code,
            "file_path": file_path,
        }]);

        let response = self
            .request(Method::POST, "components", Some(body), true)
            .await?;
        Self::single_row(response, "component").await
    }

    /// List a project's components, most recently updated first.
    pub async fn list_project_components(&self, project_id: &str) -> Result<Vec<Component>> {
        let query = format!(
            "components?project_id=eq.{}&select=*&order=updated_at.desc",
            urlencoding::encode(project_id)
        );
        let response = self.request(Method::GET, &query, None, false).await?;

        response
            .json()
            .await
            .map_err(|e| Error::Supabase(format!("Failed to parse response: {}", e)))
    }

    /// Apply a partial update to a component.
    pub async fn update_component(
        &self,
        component_id: &str,
        updates: ComponentUpdate,
    ) -> Result<Component> {
        let query = format!("components?id=eq.{}", urlencoding::encode(component_id));
        let body = serde_json::to_value(&updates)?;
        let response = self.request(Method::PATCH, &query, Some(body), true).await?;
        Self::single_row(response, &format!("component {}", component_id)).await
    }

    /// Delete a component row.
    pub async fn delete_component(&self, component_id: &str) -> Result<()> {
        let query = format!("components?id=eq.{}", urlencoding::encode(component_id));
        self.request(Method::DELETE, &query, None, false).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Deployments
    // ------------------------------------------------------------------

    /// Insert a new deployment record with status `pending`.
    pub async fn create_deployment(
        &self,
        project_id: &str,
        environment: &str,
    ) -> Result<Deployment> {
        let body = json!([{
            "project_id": project_id,
            "status": "pending",
            "environment": environment,
        }]);

        let response = self
            .request(Method::POST, "deployments", Some(body), true)
            .await?;
        Self::single_row(response, "deployment").await
    }

    /// Apply a partial update to a deployment record.
    pub async fn update_deployment(
        &self,
        deployment_id: &str,
        updates: DeploymentUpdate,
    ) -> Result<Deployment> {
        let query = format!("deployments?id=eq.{}", urlencoding::encode(deployment_id));
        let body = serde_json::to_value(&updates)?;
        let response = self.request(Method::PATCH, &query, Some(body), true).await?;
        Self::single_row(response, &format!("deployment {}", deployment_id)).await
    }

    /// List a project's deployments, newest first.
    pub async fn list_project_deployments(&self, project_id: &str) -> Result<Vec<Deployment>> {
        let query = format!(
            "deployments?project_id=eq.{}&select=*&order=created_at.desc",
            urlencoding::encode(project_id)
        );
        let response = self.request(Method::GET, &query, None, false).await?;

        response
            .json()
            .await
            .map_err(|e| Error::Supabase(format!("Failed to parse response: {}", e)))
    }
}
