use serde::{Deserialize, Serialize};

use super::user::User;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    #[default]
    Default,
    Code,
}

/// Project as returned by the API
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProjectOut {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub framework: String,
    #[serde(default)]
    pub project_type: ProjectType,
    #[serde(default)]
    pub user: Option<User>,
    /// Artifacts are owned by another service; kept opaque.
    #[serde(default)]
    pub artifacts: Option<Vec<serde_json::Value>>,
}

/// Payload for creating a project
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProjectIn {
    pub name: String,
    pub project_type: ProjectType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub framework: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl ProjectIn {
    pub fn new(name: impl Into<String>, project_type: ProjectType, framework: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project_type,
            description: None,
            framework: framework.into(),
            user_id: None,
        }
    }
}

/// Partial update; only the fields that are set are sent
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}
