//! Project asset routes, backed by object storage.
//!
//! Routes:
//! - GET /projects/:id/assets - List a project's uploaded assets
//! - POST /projects/:id/assets - Upload an asset (base64 payload)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::api::projects::load_owned_project;
use crate::middleware::AuthUser;
use crate::services::ASSETS_BUCKET;
use crate::{AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new().route("/:id/assets", get(list_assets).post(upload_asset))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadAssetRequest {
    file_name: Option<String>,
    /// Base64-encoded file body.
    content: Option<String>,
    content_type: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadAssetResponse {
    url: String,
    path: String,
}

#[derive(Debug, Serialize)]
struct AssetListResponse {
    assets: Vec<AssetEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssetEntry {
    name: String,
    url: String,
}

/// GET /projects/:id/assets
async fn list_assets(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<AssetListResponse>> {
    load_owned_project(&state, &id, &auth.id).await?;

    let objects = state.storage.list(ASSETS_BUCKET, &id).await?;
    let assets = objects
        .into_iter()
        .map(|object| {
            let path = format!("{}/{}", id, object.name);
            AssetEntry {
                url: state.storage.public_url(ASSETS_BUCKET, &path),
                name: object.name,
            }
        })
        .collect();

    Ok(Json(AssetListResponse { assets }))
}

/// POST /projects/:id/assets
async fn upload_asset(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<UploadAssetRequest>,
) -> Result<(StatusCode, Json<UploadAssetResponse>)> {
    load_owned_project(&state, &id, &auth.id).await?;

    let file_name = body
        .file_name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::Validation("File name and content are required".to_string()))?;
    let content = body
        .content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| Error::Validation("File name and content are required".to_string()))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(content.as_bytes())
        .map_err(|e| Error::InvalidInput(format!("Content is not valid base64: {}", e)))?;

    let content_type = body.content_type.unwrap_or_else(|| {
        mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .to_string()
    });

    let path = format!("{}/{}", id, file_name);
    let url = state
        .storage
        .upload(ASSETS_BUCKET, &path, bytes, &content_type)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadAssetResponse { url, path }),
    ))
}
