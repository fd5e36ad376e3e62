//! Deployment models mirroring the relational backend's `deployments` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deployment target environment. Stored as text by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployEnvironment {
    Development,
    Staging,
    Production,
}

impl DeployEnvironment {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployEnvironment::Development => "development",
            DeployEnvironment::Staging => "staging",
            DeployEnvironment::Production => "production",
        }
    }
}

impl std::str::FromStr for DeployEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(DeployEnvironment::Development),
            "staging" => Ok(DeployEnvironment::Staging),
            "production" => Ok(DeployEnvironment::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

/// A deployment record. Created with status `pending`; status transitions
/// happen on the vendor side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    pub project_id: String,
    pub status: String,
    pub environment: String,
    #[serde(default)]
    pub deploy_url: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
