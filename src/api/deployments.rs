//! Deployment record routes, nested under a project.
//!
//! Routes:
//! - GET /projects/:id/deployments - List deployment records
//! - POST /projects/:id/deployments - Create a deployment record

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::projects::load_owned_project;
use crate::middleware::AuthUser;
use crate::models::{DeployEnvironment, Deployment};
use crate::{AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/:id/deployments",
        get(list_deployments).post(create_deployment),
    )
}

#[derive(Debug, Deserialize)]
struct CreateDeploymentRequest {
    environment: Option<String>,
}

#[derive(Debug, Serialize)]
struct DeploymentResponse {
    deployment: Deployment,
}

#[derive(Debug, Serialize)]
struct DeploymentListResponse {
    deployments: Vec<Deployment>,
}

/// GET /projects/:id/deployments
async fn list_deployments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeploymentListResponse>> {
    load_owned_project(&state, &id, &auth.id).await?;
    let deployments = state.db.list_project_deployments(&id).await?;
    Ok(Json(DeploymentListResponse { deployments }))
}

/// POST /projects/:id/deployments
async fn create_deployment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<CreateDeploymentRequest>,
) -> Result<(StatusCode, Json<DeploymentResponse>)> {
    load_owned_project(&state, &id, &auth.id).await?;

    let environment: DeployEnvironment = body
        .environment
        .filter(|e| !e.is_empty())
        .ok_or_else(|| Error::Validation("Environment is required".to_string()))?
        .parse()
        .map_err(Error::Validation)?;

    let deployment = state
        .db
        .create_deployment(&id, environment.as_str())
        .await?;
    Ok((StatusCode::CREATED, Json(DeploymentResponse { deployment })))
}
