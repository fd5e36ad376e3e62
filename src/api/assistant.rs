//! Project planning routes (simulated intelligence).
//!
//! Routes:
//! - POST /assistant/analyze - Analyze project requirements
//! - POST /assistant/generate - Generate component code
//! - POST /assistant/debug - Quick debug pass

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use serde_json::Value;

use crate::services::{
    CodeGenerationRequest, CodeGenerationResponse, DebugRequest, DebugResponse, ProjectAnalysis,
    ProjectRequirements,
};
use crate::{AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/generate", post(generate))
        .route("/debug", post(debug))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeBody {
    project_description: Option<String>,
    target_audience: Option<String>,
    features: Option<Vec<String>>,
    design_preferences: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody {
    project_id: Option<String>,
    component_type: Option<String>,
    specifications: Option<Value>,
    existing_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugBody {
    project_id: Option<String>,
    code: Option<String>,
    error_message: Option<String>,
    context: Option<String>,
}

/// POST /assistant/analyze
async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<ProjectAnalysis>> {
    if body
        .project_description
        .as_deref()
        .map_or(true, str::is_empty)
    {
        return Err(Error::Validation(
            "Project description is required".to_string(),
        ));
    }

    let requirements = ProjectRequirements {
        project_description: body.project_description,
        target_audience: body.target_audience,
        features: body.features,
        design_preferences: body.design_preferences,
    };

    Ok(Json(state.planner.analyze_requirements(&requirements)))
}

/// POST /assistant/generate
async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<CodeGenerationResponse>> {
    if body.project_id.as_deref().map_or(true, str::is_empty)
        || body.component_type.as_deref().map_or(true, str::is_empty)
        || body.specifications.is_none()
    {
        return Err(Error::Validation(
            "Missing required fields: projectId, componentType, and specifications are required"
                .to_string(),
        ));
    }

    let request = CodeGenerationRequest {
        project_id: body.project_id,
        component_type: body.component_type,
        specifications: body.specifications,
        existing_code: body.existing_code,
    };

    Ok(Json(state.planner.generate_code(&request)))
}

/// POST /assistant/debug
async fn debug(
    State(state): State<AppState>,
    Json(body): Json<DebugBody>,
) -> Result<Json<DebugResponse>> {
    if body.project_id.as_deref().map_or(true, str::is_empty)
        || body.code.as_deref().map_or(true, str::is_empty)
    {
        return Err(Error::Validation(
            "Missing required fields: projectId and code are required".to_string(),
        ));
    }

    let request = DebugRequest {
        project_id: body.project_id,
        code: body.code,
        error_message: body.error_message,
        context: body.context,
    };

    Ok(Json(state.planner.debug_code(&request)))
}
