use std::sync::Arc;

use docy_core::models::{
    AgentIn, AgentOut, AgentUpdate, ChatCreate, ChatRead, ChatReadWithMessages, ChatUpdate,
    FileContent, FileInfo, MessageCreate, MessageRead, ProjectIn, ProjectOut, ProjectUpdate,
    TaskFilter, TaskIn, TaskOut, TaskUpdate,
};
use docy_core::Config;
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::paths;
use super::request::ApiRequest;
use crate::error::{ApiError, Result};
use crate::http::transport::HttpTransport;
use crate::transport_trait::ApiTransport;

/// Typed operations of the docy API, one method per endpoint.
///
/// Cheap to clone; all clones share the same transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn ApiTransport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Client over HTTP using the given configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport)))
    }

    async fn fetch_optional<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Option<T>> {
        let label = request.to_string();
        match self.transport.execute(request).await? {
            None => Ok(None),
            Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
                debug!("Could not decode response of {label}: {e}");
                ApiError::malformed(e)
            }),
        }
    }

    /// A missing payload on a list endpoint is an empty list.
    async fn fetch_list<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Vec<T>> {
        Ok(self.fetch_optional(request).await?.unwrap_or_default())
    }

    async fn fetch_required<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let label = request.to_string();
        self.fetch_optional(request)
            .await?
            .ok_or_else(|| ApiError::malformed(format!("{label} returned no data")))
    }

    async fn send(&self, request: ApiRequest) -> Result<Option<Value>> {
        self.transport.execute(request).await
    }

    // ========== Projects ==========

    pub async fn list_projects(&self) -> Result<Vec<ProjectOut>> {
        self.fetch_list(ApiRequest::get(paths::PROJECTS)).await
    }

    pub async fn get_project(&self, project_id: i64) -> Result<ProjectOut> {
        self.fetch_required(ApiRequest::get(paths::project(project_id)))
            .await
    }

    pub async fn create_project(&self, project: &ProjectIn) -> Result<ProjectOut> {
        self.fetch_required(ApiRequest::post(paths::PROJECTS).json(project)?)
            .await
    }

    pub async fn update_project(&self, project_id: i64, update: &ProjectUpdate) -> Result<ProjectOut> {
        self.fetch_required(ApiRequest::put(paths::project(project_id)).json(update)?)
            .await
    }

    pub async fn list_user_projects(&self, user_id: i64) -> Result<Vec<ProjectOut>> {
        self.fetch_list(ApiRequest::get(paths::user_projects(user_id)))
            .await
    }

    // ========== Agents ==========

    pub async fn list_agents(&self) -> Result<Vec<AgentOut>> {
        self.fetch_list(ApiRequest::get(paths::AGENTS)).await
    }

    pub async fn list_active_agents(&self) -> Result<Vec<AgentOut>> {
        self.fetch_list(ApiRequest::get(paths::ACTIVE_AGENTS)).await
    }

    pub async fn get_agent(&self, agent_id: i64) -> Result<AgentOut> {
        self.fetch_required(ApiRequest::get(paths::agent(agent_id)))
            .await
    }

    pub async fn create_agent(&self, agent: &AgentIn) -> Result<AgentOut> {
        self.fetch_required(ApiRequest::post(paths::AGENTS).json(agent)?)
            .await
    }

    pub async fn update_agent(&self, agent_id: i64, update: &AgentUpdate) -> Result<AgentOut> {
        self.fetch_required(ApiRequest::put(paths::agent(agent_id)).json(update)?)
            .await
    }

    // ========== Chats ==========

    pub async fn list_chats(&self) -> Result<Vec<ChatRead>> {
        self.fetch_list(ApiRequest::get(paths::CHATS)).await
    }

    /// Chat including its messages
    pub async fn get_chat(&self, chat_id: i64) -> Result<ChatReadWithMessages> {
        self.fetch_required(ApiRequest::get(paths::chat(chat_id)))
            .await
    }

    pub async fn create_chat(&self, chat: &ChatCreate) -> Result<ChatRead> {
        self.fetch_required(ApiRequest::post(paths::CHATS).json(chat)?)
            .await
    }

    pub async fn update_chat(&self, chat_id: i64, update: &ChatUpdate) -> Result<ChatRead> {
        self.fetch_required(ApiRequest::put(paths::chat(chat_id)).json(update)?)
            .await
    }

    pub async fn list_messages(&self, chat_id: i64) -> Result<Vec<MessageRead>> {
        self.fetch_list(ApiRequest::get(paths::chat_messages(chat_id)))
            .await
    }

    pub async fn send_message(&self, chat_id: i64, message: &MessageCreate) -> Result<MessageRead> {
        self.fetch_required(ApiRequest::post(paths::chat_messages(chat_id)).json(message)?)
            .await
    }

    // ========== Files ==========

    pub async fn list_files(&self) -> Result<Vec<FileInfo>> {
        self.fetch_list(ApiRequest::get(paths::FILES)).await
    }

    pub async fn read_file(&self, name: &str) -> Result<FileContent> {
        self.fetch_required(ApiRequest::get(paths::file_content(name)))
            .await
    }

    /// Create or overwrite a file. Returns the server's confirmation message.
    pub async fn write_file(&self, file: &FileContent) -> Result<String> {
        let response = self.send(ApiRequest::post(paths::FILES).json(file)?).await?;
        Ok(response
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("File '{}' saved", file.name)))
    }

    pub async fn delete_file(&self, name: &str) -> Result<()> {
        self.send(ApiRequest::delete(paths::file(name))).await?;
        Ok(())
    }

    // ========== Tasks ==========

    pub async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<TaskOut>> {
        self.fetch_list(ApiRequest::get(paths::TASKS).queries(filter.query_pairs()))
            .await
    }

    pub async fn list_unassigned_tasks(&self, project_id: Option<i64>) -> Result<Vec<TaskOut>> {
        let mut request = ApiRequest::get(paths::UNASSIGNED_TASKS);
        if let Some(project_id) = project_id {
            request = request.query("project_id", project_id);
        }
        self.fetch_list(request).await
    }

    pub async fn get_task(&self, task_id: i64) -> Result<TaskOut> {
        self.fetch_required(ApiRequest::get(paths::task(task_id)))
            .await
    }

    /// Returns the id the server assigned to the new task.
    pub async fn create_task(&self, task: &TaskIn) -> Result<i64> {
        self.fetch_required(ApiRequest::post(paths::TASKS).json(task)?)
            .await
    }

    pub async fn update_task(&self, task_id: i64, update: &TaskUpdate) -> Result<TaskOut> {
        self.fetch_required(ApiRequest::patch(paths::task(task_id)).json(update)?)
            .await
    }

    pub async fn delete_task(&self, task_id: i64) -> Result<()> {
        self.send(ApiRequest::delete(paths::task(task_id))).await?;
        Ok(())
    }
}
