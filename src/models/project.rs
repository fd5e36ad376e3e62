//! Project models mirroring the relational backend's `projects` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Project lifecycle status. Stored as text by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Draft,
    Building,
    Deployed,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::Building => "building",
            ProjectStatus::Deployed => "deployed",
            ProjectStatus::Archived => "archived",
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Draft
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ProjectStatus::Draft),
            "building" => Ok(ProjectStatus::Building),
            "deployed" => Ok(ProjectStatus::Deployed),
            "archived" => Ok(ProjectStatus::Archived),
            _ => Err(format!("Unknown project status: {}", s)),
        }
    }
}

/// A project row. Created with status `draft`; the row itself is owned by
/// the relational backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub user_id: String,
    pub status: String,
    #[serde(default)]
    pub repository_url: Option<String>,
    #[serde(default)]
    pub deployment_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Ownership gate used by every project-scoped handler.
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
