use docy_client::ApiClient;
use docy_core::Config;
use log::info;

use crate::stores::{AgentStore, ChatStore, FileStore, ProjectStore, TaskStore};

/// One store per entity kind, sharing a single API client.
///
/// Create it once per application and hand clones to whatever needs state;
/// clones share the same stores.
#[derive(Clone)]
pub struct Stores {
    pub projects: ProjectStore,
    pub agents: AgentStore,
    pub chats: ChatStore,
    pub files: FileStore,
    pub tasks: TaskStore,
}

impl Stores {
    pub fn new(api: ApiClient) -> Self {
        Self {
            projects: ProjectStore::new(api.clone()),
            agents: AgentStore::new(api.clone()),
            chats: ChatStore::new(api.clone()),
            files: FileStore::new(api.clone()),
            tasks: TaskStore::new(api),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        info!("Connecting stores to {}", config.base_url());
        Ok(Self::new(ApiClient::from_config(config)?))
    }
}
