//! siteforge - Vendor gateway for an AI-assisted website builder
//!
//! A thin HTTP layer over four external platforms: a backend-as-a-service
//! (auth, tables, object storage), the GitHub REST API, the Netlify REST
//! API, and an LLM completion API. Handlers validate a JSON body, forward
//! to one vendor client, and reshape the vendor response.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use error::{Error, Result};
pub use state::AppState;
