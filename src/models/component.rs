//! Component models mirroring the relational backend's `components` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated code component belonging to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub project_id: String,
    pub name: String,
    /// Component kind, e.g. "react-component" or "api-route".
    #[serde(rename = "type")]
    pub kind: String,
    pub code: String,
    pub file_path: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
