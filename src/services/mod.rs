//! Service layer for siteforge.
//!
//! One client per vendor concern:
//! - Auth (backend-as-a-service sessions and profiles)
//! - Database (backend-as-a-service tables)
//! - Storage (backend-as-a-service object storage)
//! - GitHub (repository automation)
//! - Netlify (sites and deploys)
//! - Llm (model completion API)
//! - Assist (LLM-backed code assistance)
//! - Planner (simulated project planning)

mod assist;
mod auth;
mod database;
mod github;
mod llm;
mod netlify;
mod planner;
mod storage;

pub use assist::{
    AccessibilityCheckRequest, AccessibilityCheckResponse, AssistService, CodeAnalysisRequest,
    CodeAnalysisResponse, DocumentationRequest, DocumentationResponse, ErrorFixRequest,
    ErrorFixResponse, OptimizationRequest, OptimizationResponse, SecurityAuditRequest,
    SecurityAuditResponse, TestGenerationRequest, TestGenerationResponse,
};
pub use auth::AuthService;
pub use database::{ComponentUpdate, DatabaseService, DeploymentUpdate, ProjectUpdate};
pub use github::{
    Branch, DeployTarget, FileChange, GitHubService, PullRequest, Repository, WorkflowRun,
    WorkflowStatus,
};
pub use llm::LlmService;
pub use netlify::{
    BuildHook, BuildSettings, Deploy, DeployKey, DeployOptions, FormSubmission, NetlifyService,
    RepoSettings, Site, SiteOptions,
};
pub use planner::{
    CodeGenerationRequest, CodeGenerationResponse, DebugRequest, DebugResponse, PlannerService,
    ProjectAnalysis, ProjectRequirements,
};
pub use storage::{StorageService, ASSETS_BUCKET, AVATARS_BUCKET};
