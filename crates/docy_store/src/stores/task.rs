use std::collections::BTreeMap;

use async_trait::async_trait;
use docy_client::{ApiClient, ApiError, Result};
use docy_core::models::{TaskFilter, TaskIn, TaskOut, TaskSummary, TaskUpdate};
use log::debug;

use crate::error::StoreResult;
use crate::resource::{check_positive_id, Resource};
use crate::store::{EntityStore, Settle};

pub struct Tasks;

/// Client-only task state: whether the task view is active, and display
/// entries for tasks the user is following, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    pub active: bool,
    pub tracked: BTreeMap<i64, TaskSummary>,
}

#[async_trait]
impl Resource for Tasks {
    type Key = i64;
    type Record = TaskOut;
    type Detail = TaskOut;
    type Create = TaskIn;
    /// The server answers a create with the new id only.
    type Created = i64;
    type Update = TaskUpdate;
    type Updated = TaskOut;
    type Local = TaskBoard;

    const NAME: &'static str = "task";

    fn detail_key(detail: &TaskOut) -> i64 {
        detail.id
    }

    fn check_key(key: &i64) -> Result<()> {
        check_positive_id(Self::NAME, *key)
    }

    async fn list(api: &ApiClient) -> Result<Vec<TaskOut>> {
        api.list_tasks(&TaskFilter::default()).await
    }

    async fn get(api: &ApiClient, key: &i64) -> Result<TaskOut> {
        api.get_task(*key).await
    }

    async fn create(api: &ApiClient, payload: &TaskIn) -> Result<i64> {
        if payload.project_id.is_none() {
            return Err(ApiError::validation("Project ID not found"));
        }
        api.create_task(payload).await
    }

    async fn update(api: &ApiClient, key: &i64, payload: &TaskUpdate) -> Result<TaskOut> {
        api.update_task(*key, payload).await
    }
}

pub type TaskStore = EntityStore<Tasks>;

impl EntityStore<Tasks> {
    /// Replace `items` with the tasks matching `filter`.
    pub async fn fetch_all_filtered(&self, filter: TaskFilter) -> StoreResult<Vec<TaskOut>> {
        self.run(Settle::Done, self.api().list_tasks(&filter), |state, items| {
            state.items = items.clone();
        })
        .await
    }

    /// Replace `items` with the tasks no agent has picked up, optionally
    /// limited to one project.
    pub async fn fetch_unassigned(&self, project_id: Option<i64>) -> StoreResult<Vec<TaskOut>> {
        let call = self.api().list_unassigned_tasks(project_id);
        self.run(Settle::Done, call, |state, items| {
            state.items = items.clone();
        })
        .await
    }

    pub async fn delete(&self, task_id: i64) -> StoreResult<()> {
        let api = self.api();
        let call = async {
            check_positive_id(Tasks::NAME, task_id)?;
            api.delete_task(task_id).await
        };
        self.run_write(Settle::Continue, call, |_, _| {}).await?;
        if self.is_selected(&task_id) {
            self.clear_current();
        }
        self.refetch_all().await;
        Ok(())
    }

    pub fn set_active(&self, active: bool) {
        self.modify_local(|board| board.active = active);
    }

    pub fn is_active(&self) -> bool {
        self.snapshot().local.active
    }

    /// Add or replace the display entry for a task.
    pub fn track(&self, summary: TaskSummary) {
        debug!("Tracking task {} ({})", summary.id, summary.name);
        self.modify_local(|board| {
            board.tracked.insert(summary.id, summary);
        });
    }

    /// Tracked tasks ordered by id.
    pub fn tracked(&self) -> Vec<TaskSummary> {
        self.snapshot().local.tracked.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use docy_client::Method;
    use docy_core::models::{TaskFilter, TaskIn, TaskStatus, TaskSummary};
    use serde_json::{json, Value};

    use super::*;
    use crate::testing::ScriptedTransport;

    fn task_json(id: i64, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "description": "",
            "category": "coding",
            "status": "pending",
            "subtasks": []
        })
    }

    #[tokio::test]
    async fn test_create_without_project_is_rejected_locally() {
        let transport = ScriptedTransport::new();
        let store = TaskStore::new(transport.client());
        let mut task = TaskIn::new("build", "compile everything", 1);
        task.project_id = None;

        let err = store.create(&task).await.unwrap_err();

        assert_eq!(err.to_string(), "Project ID not found");
        assert_eq!(store.error_message().as_deref(), Some("Project ID not found"));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_returns_new_id_and_refetches() {
        let transport = ScriptedTransport::new();
        transport.respond(Method::POST, "/api/v1/tasks/", json!(42));
        transport.respond(Method::GET, "/api/v1/tasks/", json!([task_json(42, "build")]));
        let store = TaskStore::new(transport.client());

        let id = store
            .create(&TaskIn::new("build", "compile everything", 1))
            .await
            .unwrap();

        assert_eq!(id, 42);
        assert_eq!(store.items()[0].status, Some(TaskStatus::Pending));
    }

    #[tokio::test]
    async fn test_filtered_fetch_sends_query() {
        let transport = ScriptedTransport::new();
        transport.respond(Method::GET, "/api/v1/tasks/", json!([task_json(1, "a")]));
        let store = TaskStore::new(transport.client());

        store
            .fetch_all_filtered(TaskFilter {
                project_id: Some(3),
                agent_id: Some(8),
            })
            .await
            .unwrap();

        let query = transport.requests()[0].query.clone();
        assert_eq!(
            query,
            vec![
                ("project_id".to_string(), "3".to_string()),
                ("agent_id".to_string(), "8".to_string()),
            ]
        );
        assert_eq!(store.items().len(), 1);
    }

    #[tokio::test]
    async fn test_unassigned_replaces_items() {
        let transport = ScriptedTransport::new();
        transport.respond(
            Method::GET,
            "/api/v1/tasks/unassigned",
            json!([task_json(5, "orphan")]),
        );
        let store = TaskStore::new(transport.client());

        store.fetch_unassigned(Some(2)).await.unwrap();

        assert_eq!(store.items()[0].name, "orphan");
        assert_eq!(
            transport.requests()[0].query,
            vec![("project_id".to_string(), "2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_delete_selected_task() {
        let transport = ScriptedTransport::new();
        transport.respond(Method::GET, "/api/v1/tasks/5", task_json(5, "old"));
        transport.respond_empty(Method::DELETE, "/api/v1/tasks/5");
        transport.respond(Method::GET, "/api/v1/tasks/", json!([]));
        let store = TaskStore::new(transport.client());
        store.fetch_one(5).await.unwrap();

        store.delete(5).await.unwrap();

        assert!(store.current().is_none());
        assert_eq!(
            transport.calls(),
            vec![
                "GET /api/v1/tasks/5",
                "DELETE /api/v1/tasks/5",
                "GET /api/v1/tasks/",
            ]
        );
    }

    #[tokio::test]
    async fn test_update_uses_patch() {
        let transport = ScriptedTransport::new();
        transport.respond(Method::PATCH, "/api/v1/tasks/5", task_json(5, "renamed"));
        transport.respond(Method::GET, "/api/v1/tasks/", json!([task_json(5, "renamed")]));
        let store = TaskStore::new(transport.client());

        let update = TaskUpdate {
            name: Some("renamed".to_string()),
            ..Default::default()
        };
        let updated = store.update(5, &update).await.unwrap();

        assert_eq!(updated.name, "renamed");
        assert_eq!(
            transport.calls(),
            vec!["PATCH /api/v1/tasks/5", "GET /api/v1/tasks/"]
        );
    }

    #[test]
    fn board_tracks_latest_summary_per_task() {
        let transport = ScriptedTransport::new();
        let store = TaskStore::new(transport.client());

        assert!(!store.is_active());
        store.set_active(true);
        assert!(store.is_active());

        store.track(TaskSummary {
            id: 2,
            name: "b".to_string(),
        });
        store.track(TaskSummary {
            id: 1,
            name: "a".to_string(),
        });
        store.track(TaskSummary {
            id: 2,
            name: "b2".to_string(),
        });

        let names: Vec<_> = store.tracked().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["a", "b2"]);
    }
}
