//! Netlify automation routes.
//!
//! Routes:
//! - POST /netlify/sites - Create a site for a project
//! - POST /netlify/deploy - Deploy a directory to a site
//! - POST /netlify/continuous-deployment - Wire a site to a repository
//!
//! Each request may carry a `token` that overrides the configured Netlify
//! token; with neither present the route answers 401.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::{RepoSettings, Site};
use crate::{AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sites", post(create_site))
        .route("/deploy", post(deploy))
        .route("/continuous-deployment", post(continuous_deployment))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GitHubRepoRef {
    owner: Option<String>,
    repo: Option<String>,
    branch: Option<String>,
    private: Option<bool>,
}

impl GitHubRepoRef {
    /// Convert to vendor repo settings; None when owner/repo are missing.
    fn into_settings(self) -> Option<RepoSettings> {
        match (self.owner, self.repo) {
            (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
                Some(RepoSettings {
                    provider: "github".to_string(),
                    repo: format!("{}/{}", owner, repo),
                    private: self.private,
                    branch: self.branch,
                })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSiteRequest {
    project_name: Option<String>,
    build_command: Option<String>,
    build_dir: Option<String>,
    github_repo: Option<GitHubRepoRef>,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct SiteResponse {
    site: Site,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeployRequest {
    site_id: Option<String>,
    local_dir: Option<String>,
    message: Option<String>,
    production: Option<bool>,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeployResponse {
    deploy_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContinuousDeploymentRequest {
    site_id: Option<String>,
    github_repo: Option<GitHubRepoRef>,
    build_command: Option<String>,
    build_dir: Option<String>,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct SuccessResponse {
    success: bool,
}

/// POST /netlify/sites
async fn create_site(
    State(state): State<AppState>,
    Json(body): Json<CreateSiteRequest>,
) -> Result<(StatusCode, Json<SiteResponse>)> {
    let project_name = body
        .project_name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::Validation("Project name is required".to_string()))?;

    let token = state.resolve_netlify_token(body.token.as_deref())?;
    let repo = body.github_repo.and_then(GitHubRepoRef::into_settings);

    let site = state
        .netlify
        .create_site_for_project(
            &project_name,
            body.build_command.as_deref(),
            body.build_dir.as_deref(),
            repo,
            &token,
        )
        .await?;

    info!(site_id = %site.id, "Site created");
    Ok((StatusCode::CREATED, Json(SiteResponse { site })))
}

/// POST /netlify/deploy
async fn deploy(
    State(state): State<AppState>,
    Json(body): Json<DeployRequest>,
) -> Result<Json<DeployResponse>> {
    let site_id = body
        .site_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            Error::Validation("Site ID and local directory are required".to_string())
        })?;
    let local_dir = body
        .local_dir
        .filter(|d| !d.is_empty())
        .ok_or_else(|| {
            Error::Validation("Site ID and local directory are required".to_string())
        })?;

    let token = state.resolve_netlify_token(body.token.as_deref())?;

    let production = body.production.unwrap_or(false);
    let default_message = if production {
        "Production deployment"
    } else {
        "Preview deployment"
    };
    let message = body.message.as_deref().unwrap_or(default_message);

    let deploy_url = state
        .netlify
        .deploy_site(&site_id, &local_dir, message, !production, &token)
        .await?;

    Ok(Json(DeployResponse { deploy_url }))
}

/// POST /netlify/continuous-deployment
async fn continuous_deployment(
    State(state): State<AppState>,
    Json(body): Json<ContinuousDeploymentRequest>,
) -> Result<Json<SuccessResponse>> {
    let site_id = body
        .site_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            Error::Validation("Site ID and GitHub repository details are required".to_string())
        })?;
    let repo = body
        .github_repo
        .and_then(GitHubRepoRef::into_settings)
        .ok_or_else(|| {
            Error::Validation("Site ID and GitHub repository details are required".to_string())
        })?;

    let token = state.resolve_netlify_token(body.token.as_deref())?;

    state
        .netlify
        .setup_continuous_deployment(
            &site_id,
            repo,
            body.build_command.as_deref(),
            body.build_dir.as_deref(),
            &token,
        )
        .await?;

    Ok(Json(SuccessResponse { success: true }))
}
