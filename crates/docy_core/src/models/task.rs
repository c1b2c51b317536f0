use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Coding,
    Writing,
    Planning,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Failed,
    // The server spells this one in capitals.
    #[serde(rename = "ERROR")]
    Error,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TaskOut {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub subtasks: Vec<SubTaskOut>,
    #[serde(default)]
    pub agent: Option<serde_json::Value>,
    #[serde(default)]
    pub project: Option<serde_json::Value>,
}

impl TaskOut {
    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.is_completed).count()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SubTaskOut {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SubTaskIn {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub is_completed: bool,
    pub task_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<i64>,
}

/// Payload for creating a task; the server answers with the new id only
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TaskIn {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub task_type: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<SubTaskIn>>,
}

impl TaskIn {
    pub fn new(name: impl Into<String>, description: impl Into<String>, project_id: i64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            task_type: Category::default(),
            agent_id: None,
            project_id: Some(project_id),
            subtasks: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<Category>,
}

/// Query filters for the task listing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub project_id: Option<i64>,
    pub agent_id: Option<i64>,
}

impl TaskFilter {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(project_id) = self.project_id {
            pairs.push(("project_id".to_string(), project_id.to_string()));
        }
        if let Some(agent_id) = self.agent_id {
            pairs.push(("agent_id".to_string(), agent_id.to_string()));
        }
        pairs
    }
}

/// Minimal display entry for a task the client is following locally
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TaskSummary {
    pub id: i64,
    pub name: String,
}

impl From<&TaskOut> for TaskSummary {
    fn from(task: &TaskOut) -> Self {
        Self {
            id: task.id,
            name: task.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uppercase_error_status_decodes() {
        let task: TaskOut = serde_json::from_value(json!({
            "id": 1,
            "name": "build",
            "description": "",
            "category": "planning",
            "status": "ERROR",
            "subtasks": [
                {"id": 10, "name": "a", "is_completed": true},
                {"id": 11, "name": "b"}
            ]
        }))
        .unwrap();

        assert_eq!(task.status, Some(TaskStatus::Error));
        assert_eq!(task.category, Category::Planning);
        assert_eq!(task.completed_subtasks(), 1);
    }

    #[test]
    fn filter_only_emits_set_fields() {
        let filter = TaskFilter {
            project_id: Some(4),
            agent_id: None,
        };
        assert_eq!(
            filter.query_pairs(),
            vec![("project_id".to_string(), "4".to_string())]
        );
        assert!(TaskFilter::default().query_pairs().is_empty());
    }
}
