//! API routes for siteforge.
//!
//! This module combines all route handlers into a single router.
//!
//! Route structure:
//! - /health - Health check (public)
//! - /auth/* - Registration, login, logout (public + token)
//! - /projects/* - Projects, components, deployments, assets (token-protected)
//! - /github/* - Repository automation (vendor token in body or config)
//! - /netlify/* - Site and deploy automation (vendor token in body or config)
//! - /assistant/* - Simulated project planning (public)
//! - /code/* - LLM-backed code assistance (public)

mod assets;
mod assistant;
mod auth;
mod code;
mod components;
mod deployments;
mod github;
mod netlify;
mod projects;
mod status;

use axum::Router;

use crate::middleware::require_user;
use crate::AppState;

/// Build the complete API router.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(status::routes())
        .nest("/auth", auth::routes())
        .nest("/projects", project_routes(state))
        .nest("/github", github::routes())
        .nest("/netlify", netlify::routes())
        .nest("/assistant", assistant::routes())
        .nest("/code", code::routes())
}

/// Project-scoped routes behind user authentication.
fn project_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(projects::routes())
        .merge(components::routes())
        .merge(deployments::routes())
        .merge(assets::routes())
        .layer(axum::middleware::from_fn_with_state(state, require_user))
}
