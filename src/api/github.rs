//! GitHub automation routes.
//!
//! Routes:
//! - POST /github/setup - Create a repository for a project
//! - POST /github/commit - Commit multiple files in one commit
//! - POST /github/feature - Create a feature branch and open a PR
//! - POST /github/cicd - Commit a CI/CD workflow
//! - GET /github/status - Latest workflow run status
//!
//! Each request may carry a `token` that overrides the configured GitHub
//! token; with neither present the route answers 401.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::{DeployTarget, FileChange, WorkflowStatus};
use crate::{AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/setup", post(setup_repository))
        .route("/commit", post(commit_files))
        .route("/feature", post(create_feature))
        .route("/cicd", post(setup_cicd))
        .route("/status", get(workflow_status))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetupRequest {
    project_name: Option<String>,
    description: Option<String>,
    is_private: Option<bool>,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetupResponse {
    repository_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitRequest {
    owner: Option<String>,
    repo: Option<String>,
    files: Option<Vec<FileChange>>,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct CommitResponse {
    success: bool,
    sha: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeatureRequest {
    owner: Option<String>,
    repo: Option<String>,
    feature_name: Option<String>,
    description: Option<String>,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureResponse {
    pull_request_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CicdRequest {
    owner: Option<String>,
    repo: Option<String>,
    build_command: Option<String>,
    test_command: Option<String>,
    deployment_target: Option<DeployTarget>,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CicdResponse {
    workflow_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusQuery {
    owner: Option<String>,
    repo: Option<String>,
    workflow_id: Option<String>,
    token: Option<String>,
}

/// POST /github/setup
async fn setup_repository(
    State(state): State<AppState>,
    Json(body): Json<SetupRequest>,
) -> Result<(StatusCode, Json<SetupResponse>)> {
    let name = body
        .project_name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::Validation("Project name is required".to_string()))?;
    let token = state.resolve_github_token(body.token.as_deref())?;

    let repository_url = state
        .github
        .setup_repository(
            &name,
            body.description.as_deref(),
            body.is_private.unwrap_or(true),
            &token,
        )
        .await?;

    info!(repository_url = %repository_url, "Repository set up");
    Ok((StatusCode::CREATED, Json(SetupResponse { repository_url })))
}

/// POST /github/commit
async fn commit_files(
    State(state): State<AppState>,
    Json(body): Json<CommitRequest>,
) -> Result<Json<CommitResponse>> {
    let owner = body
        .owner
        .filter(|o| !o.is_empty())
        .ok_or_else(|| Error::Validation("Owner, repo, and files array are required".to_string()))?;
    let repo = body
        .repo
        .filter(|r| !r.is_empty())
        .ok_or_else(|| Error::Validation("Owner, repo, and files array are required".to_string()))?;
    let files = body
        .files
        .filter(|f| !f.is_empty())
        .ok_or_else(|| Error::Validation("Owner, repo, and files array are required".to_string()))?;

    let token = state.resolve_github_token(body.token.as_deref())?;

    let sha = state
        .github
        .commit_project_files(&owner, &repo, &files, &token)
        .await?;

    Ok(Json(CommitResponse { success: true, sha }))
}

/// POST /github/feature
async fn create_feature(
    State(state): State<AppState>,
    Json(body): Json<FeatureRequest>,
) -> Result<(StatusCode, Json<FeatureResponse>)> {
    let owner = body
        .owner
        .filter(|o| !o.is_empty())
        .ok_or_else(|| Error::Validation("Owner, repo, and feature name are required".to_string()))?;
    let repo = body
        .repo
        .filter(|r| !r.is_empty())
        .ok_or_else(|| Error::Validation("Owner, repo, and feature name are required".to_string()))?;
    let feature_name = body
        .feature_name
        .filter(|f| !f.is_empty())
        .ok_or_else(|| Error::Validation("Owner, repo, and feature name are required".to_string()))?;

    let token = state.resolve_github_token(body.token.as_deref())?;

    let pull_request_url = state
        .github
        .create_feature_branch_and_pr(
            &owner,
            &repo,
            &feature_name,
            body.description.as_deref(),
            &token,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(FeatureResponse { pull_request_url }),
    ))
}

/// POST /github/cicd
async fn setup_cicd(
    State(state): State<AppState>,
    Json(body): Json<CicdRequest>,
) -> Result<(StatusCode, Json<CicdResponse>)> {
    let owner = body
        .owner
        .filter(|o| !o.is_empty())
        .ok_or_else(|| Error::Validation("Owner and repo are required".to_string()))?;
    let repo = body
        .repo
        .filter(|r| !r.is_empty())
        .ok_or_else(|| Error::Validation("Owner and repo are required".to_string()))?;

    let token = state.resolve_github_token(body.token.as_deref())?;

    let workflow_url = state
        .github
        .setup_cicd(
            &owner,
            &repo,
            body.build_command.as_deref().unwrap_or("npm run build"),
            body.test_command.as_deref().unwrap_or("npm test"),
            body.deployment_target.unwrap_or_default(),
            &token,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CicdResponse { workflow_url })))
}

/// GET /github/status
async fn workflow_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<WorkflowStatus>> {
    let owner = query
        .owner
        .filter(|o| !o.is_empty())
        .ok_or_else(|| Error::Validation("Owner and repo are required".to_string()))?;
    let repo = query
        .repo
        .filter(|r| !r.is_empty())
        .ok_or_else(|| Error::Validation("Owner and repo are required".to_string()))?;
    let workflow_id = query.workflow_id.unwrap_or_else(|| "ci-cd.yml".to_string());

    let token = state.resolve_github_token(query.token.as_deref())?;

    let status = state
        .github
        .workflow_status(&owner, &repo, &workflow_id, &token)
        .await?;

    Ok(Json(status))
}
