//! LLM-backed code assistance routes.
//!
//! Routes:
//! - POST /code/analyze - Issues, suggestions, complexity metrics
//! - POST /code/fix - Fix an error and explain the root cause
//! - POST /code/optimize - Performance optimization
//! - POST /code/security - Security audit
//! - POST /code/accessibility - Accessibility check
//! - POST /code/tests - Test generation
//! - POST /code/documentation - Documentation generation
//!
//! All of these require `code` and `language`; /code/fix additionally
//! requires `error`.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::services::{
    AccessibilityCheckRequest, AccessibilityCheckResponse, CodeAnalysisRequest,
    CodeAnalysisResponse, DocumentationRequest, DocumentationResponse, ErrorFixRequest,
    ErrorFixResponse, OptimizationRequest, OptimizationResponse, SecurityAuditRequest,
    SecurityAuditResponse, TestGenerationRequest, TestGenerationResponse,
};
use crate::{AppState, Error, Result};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/fix", post(fix))
        .route("/optimize", post(optimize))
        .route("/security", post(security))
        .route("/accessibility", post(accessibility))
        .route("/tests", post(tests))
        .route("/documentation", post(documentation))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CodeBody {
    code: Option<String>,
    language: Option<String>,
    error: Option<String>,
    stack_trace: Option<String>,
    context: Option<String>,
    performance_profile: Option<serde_json::Value>,
    sensitive_operations: Option<Vec<String>>,
    test_framework: Option<String>,
    coverage_goal: Option<String>,
    style: Option<String>,
}

impl CodeBody {
    /// Require the `code` and `language` fields shared by every route.
    fn required(self) -> Result<(String, String, Self)> {
        match (self.code.clone(), self.language.clone()) {
            (Some(code), Some(language)) if !code.is_empty() && !language.is_empty() => {
                Ok((code, language, self))
            }
            _ => Err(Error::Validation(
                "Code and language are required".to_string(),
            )),
        }
    }
}

/// POST /code/analyze
async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<CodeBody>,
) -> Result<Json<CodeAnalysisResponse>> {
    let (code, language, body) = body.required()?;
    let response = state
        .assist
        .analyze_code(&CodeAnalysisRequest {
            code,
            language,
            context: body.context,
        })
        .await?;
    Ok(Json(response))
}

/// POST /code/fix
async fn fix(
    State(state): State<AppState>,
    Json(body): Json<CodeBody>,
) -> Result<Json<ErrorFixResponse>> {
    let error = body
        .error
        .clone()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| Error::Validation("Code, language, and error message are required".to_string()))?;
    let (code, language, body) = body.required().map_err(|_| {
        Error::Validation("Code, language, and error message are required".to_string())
    })?;

    let response = state
        .assist
        .fix_error(&ErrorFixRequest {
            code,
            language,
            error,
            stack_trace: body.stack_trace,
            context: body.context,
        })
        .await?;
    Ok(Json(response))
}

/// POST /code/optimize
async fn optimize(
    State(state): State<AppState>,
    Json(body): Json<CodeBody>,
) -> Result<Json<OptimizationResponse>> {
    let (code, language, body) = body.required()?;
    let performance_profile = body
        .performance_profile
        .and_then(|value| serde_json::from_value(value).ok());

    let response = state
        .assist
        .optimize_performance(&OptimizationRequest {
            code,
            language,
            performance_profile,
            context: body.context,
        })
        .await?;
    Ok(Json(response))
}

/// POST /code/security
async fn security(
    State(state): State<AppState>,
    Json(body): Json<CodeBody>,
) -> Result<Json<SecurityAuditResponse>> {
    let (code, language, body) = body.required()?;
    let response = state
        .assist
        .audit_security(&SecurityAuditRequest {
            code,
            language,
            context: body.context,
            sensitive_operations: body.sensitive_operations,
        })
        .await?;
    Ok(Json(response))
}

/// POST /code/accessibility
async fn accessibility(
    State(state): State<AppState>,
    Json(body): Json<CodeBody>,
) -> Result<Json<AccessibilityCheckResponse>> {
    let (code, language, body) = body.required()?;
    let response = state
        .assist
        .check_accessibility(&AccessibilityCheckRequest {
            code,
            language,
            context: body.context,
        })
        .await?;
    Ok(Json(response))
}

/// POST /code/tests
async fn tests(
    State(state): State<AppState>,
    Json(body): Json<CodeBody>,
) -> Result<Json<TestGenerationResponse>> {
    let (code, language, body) = body.required()?;
    let response = state
        .assist
        .generate_tests(&TestGenerationRequest {
            code,
            language,
            test_framework: body.test_framework,
            coverage_goal: body.coverage_goal,
            context: body.context,
        })
        .await?;
    Ok(Json(response))
}

/// POST /code/documentation
async fn documentation(
    State(state): State<AppState>,
    Json(body): Json<CodeBody>,
) -> Result<Json<DocumentationResponse>> {
    let (code, language, body) = body.required()?;
    let response = state
        .assist
        .generate_documentation(&DocumentationRequest {
            code,
            language,
            style: body.style,
            context: body.context,
        })
        .await?;
    Ok(Json(response))
}
