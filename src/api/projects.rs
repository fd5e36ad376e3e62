//! Project routes.
//!
//! Routes:
//! - GET /projects - List the caller's projects
//! - POST /projects - Create a project
//! - GET /projects/:id - Get a project
//! - PUT /projects/:id - Update a project
//! - DELETE /projects/:id - Delete a project
//!
//! Every project-scoped handler performs the same ownership gate: the
//! project's user_id must match the authenticated user, 403 otherwise.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::middleware::AuthUser;
use crate::models::{Project, ProjectStatus};
use crate::services::ProjectUpdate;
use crate::{AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
}

/// Fetch a project and enforce the ownership gate.
///
/// 404 when the project does not exist, 403 when it belongs to someone
/// else. Shared by the component, deployment, and asset handlers.
pub async fn load_owned_project(
    state: &AppState,
    project_id: &str,
    user_id: &str,
) -> Result<Project> {
    let project = state.db.get_project(project_id).await?;
    if !project.is_owned_by(user_id) {
        return Err(Error::Forbidden);
    }
    Ok(project)
}

#[derive(Debug, Deserialize)]
struct CreateProjectRequest {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateProjectRequest {
    name: Option<String>,
    description: Option<String>,
    status: Option<String>,
    repository_url: Option<String>,
    deployment_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct ProjectResponse {
    project: Project,
}

#[derive(Debug, Serialize)]
struct ProjectListResponse {
    projects: Vec<Project>,
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    success: bool,
}

/// GET /projects
async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<ProjectListResponse>> {
    let projects = state.db.list_user_projects(&auth.id).await?;
    Ok(Json(ProjectListResponse { projects }))
}

/// POST /projects
async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>)> {
    let name = body
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::Validation("Project name is required".to_string()))?;

    let project = state
        .db
        .create_project(&name, body.description.as_deref().unwrap_or(""), &auth.id)
        .await?;

    info!(project_id = %project.id, user_id = %auth.id, "Project created");
    Ok((StatusCode::CREATED, Json(ProjectResponse { project })))
}

/// GET /projects/:id
async fn get_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>> {
    let project = load_owned_project(&state, &id, &auth.id).await?;
    Ok(Json(ProjectResponse { project }))
}

/// PUT /projects/:id
async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>> {
    load_owned_project(&state, &id, &auth.id).await?;

    if let Some(ref status) = body.status {
        status
            .parse::<ProjectStatus>()
            .map_err(Error::Validation)?;
    }

    let updates = ProjectUpdate {
        name: body.name,
        description: body.description,
        status: body.status,
        repository_url: body.repository_url,
        deployment_url: body.deployment_url,
    };

    let project = state.db.update_project(&id, updates).await?;
    Ok(Json(ProjectResponse { project }))
}

/// DELETE /projects/:id
async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    load_owned_project(&state, &id, &auth.id).await?;
    state.db.delete_project(&id).await?;

    info!(project_id = %id, user_id = %auth.id, "Project deleted");
    Ok(Json(DeleteResponse { success: true }))
}
