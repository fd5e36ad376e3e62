//! Component routes, nested under a project.
//!
//! Routes:
//! - GET /projects/:id/components - List components
//! - POST /projects/:id/components - Create a component
//! - GET /projects/:id/components/:component_id - Get a component
//! - PUT /projects/:id/components/:component_id - Update a component
//! - DELETE /projects/:id/components/:component_id - Delete a component

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::projects::load_owned_project;
use crate::middleware::AuthUser;
use crate::models::Component;
use crate::services::ComponentUpdate;
use crate::{AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:id/components",
            get(list_components).post(create_component),
        )
        .route(
            "/:id/components/:component_id",
            get(get_component)
                .put(update_component)
                .delete(delete_component),
        )
}

#[derive(Debug, Deserialize)]
struct CreateComponentRequest {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    code: Option<String>,
    #[serde(rename = "filePath")]
    file_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpdateComponentRequest {
    name: Option<String>,
    code: Option<String>,
    #[serde(rename = "filePath")]
    file_path: Option<String>,
}

#[derive(Debug, Serialize)]
struct ComponentResponse {
    component: Component,
}

#[derive(Debug, Serialize)]
struct ComponentListResponse {
    components: Vec<Component>,
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    success: bool,
}

/// Find one component within a project, 404 when absent.
async fn find_component(
    state: &AppState,
    project_id: &str,
    component_id: &str,
) -> Result<Component> {
    let components = state.db.list_project_components(project_id).await?;
    components
        .into_iter()
        .find(|c| c.id == component_id)
        .ok_or_else(|| Error::NotFound(format!("component {}", component_id)))
}

/// GET /projects/:id/components
async fn list_components(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ComponentListResponse>> {
    load_owned_project(&state, &id, &auth.id).await?;
    let components = state.db.list_project_components(&id).await?;
    Ok(Json(ComponentListResponse { components }))
}

/// POST /projects/:id/components
async fn create_component(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<CreateComponentRequest>,
) -> Result<(StatusCode, Json<ComponentResponse>)> {
    load_owned_project(&state, &id, &auth.id).await?;

    let (name, kind, code, file_path) = match (body.name, body.kind, body.code, body.file_path) {
        (Some(name), Some(kind), Some(code), Some(file_path))
            if !name.is_empty() && !kind.is_empty() && !code.is_empty() && !file_path.is_empty() =>
        {
            (name, kind, code, file_path)
        }
        _ => {
            return Err(Error::Validation(
                "Component name, type, code, and file path are required".to_string(),
            ))
        }
    };

    let component = state
        .db
        .create_component(&id, &name, &kind, &code, &file_path)
        .await?;

    Ok((StatusCode::CREATED, Json(ComponentResponse { component })))
}

/// GET /projects/:id/components/:component_id
async fn get_component(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((id, component_id)): Path<(String, String)>,
) -> Result<Json<ComponentResponse>> {
    load_owned_project(&state, &id, &auth.id).await?;
    let component = find_component(&state, &id, &component_id).await?;
    Ok(Json(ComponentResponse { component }))
}

/// PUT /projects/:id/components/:component_id
async fn update_component(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((id, component_id)): Path<(String, String)>,
    Json(body): Json<UpdateComponentRequest>,
) -> Result<Json<ComponentResponse>> {
    load_owned_project(&state, &id, &auth.id).await?;
    find_component(&state, &id, &component_id).await?;

    let updates = ComponentUpdate {
        name: body.name,
        code: body.code,
        file_path: body.file_path,
    };

    let component = state.db.update_component(&component_id, updates).await?;
    Ok(Json(ComponentResponse { component }))
}

/// DELETE /projects/:id/components/:component_id
async fn delete_component(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((id, component_id)): Path<(String, String)>,
) -> Result<Json<DeleteResponse>> {
    load_owned_project(&state, &id, &auth.id).await?;
    find_component(&state, &id, &component_id).await?;
    state.db.delete_component(&component_id).await?;
    Ok(Json(DeleteResponse { success: true }))
}
