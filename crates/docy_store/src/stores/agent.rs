use async_trait::async_trait;
use docy_client::{ApiClient, Result};
use docy_core::models::{AgentIn, AgentOut, AgentUpdate};

use crate::error::StoreResult;
use crate::resource::{check_positive_id, Resource};
use crate::store::{EntityStore, Settle};

pub struct Agents;

#[async_trait]
impl Resource for Agents {
    type Key = i64;
    type Record = AgentOut;
    type Detail = AgentOut;
    type Create = AgentIn;
    type Created = AgentOut;
    type Update = AgentUpdate;
    type Updated = AgentOut;
    type Local = ();

    const NAME: &'static str = "agent";

    fn detail_key(detail: &AgentOut) -> i64 {
        detail.id
    }

    fn check_key(key: &i64) -> Result<()> {
        check_positive_id(Self::NAME, *key)
    }

    async fn list(api: &ApiClient) -> Result<Vec<AgentOut>> {
        api.list_agents().await
    }

    async fn get(api: &ApiClient, key: &i64) -> Result<AgentOut> {
        api.get_agent(*key).await
    }

    async fn create(api: &ApiClient, payload: &AgentIn) -> Result<AgentOut> {
        api.create_agent(payload).await
    }

    async fn update(api: &ApiClient, key: &i64, payload: &AgentUpdate) -> Result<AgentOut> {
        api.update_agent(*key, payload).await
    }
}

pub type AgentStore = EntityStore<Agents>;

impl EntityStore<Agents> {
    /// Replace `items` with the agents the server reports as active.
    pub async fn fetch_active(&self) -> StoreResult<Vec<AgentOut>> {
        self.run(Settle::Done, self.api().list_active_agents(), |state, items| {
            state.items = items.clone();
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use docy_client::Method;
    use docy_core::models::{AgentIn, AgentState, AgentUpdate};
    use serde_json::{json, Value};

    use super::*;
    use crate::testing::ScriptedTransport;

    fn agent_json(id: i64, name: &str, state: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "system_prompt_id": 1,
            "agent_type": "code",
            "agent_model": "groq_code",
            "state": state
        })
    }

    #[tokio::test]
    async fn test_fetch_active_replaces_items() {
        let transport = ScriptedTransport::new();
        transport.respond(
            Method::GET,
            "/api/v1/agents/",
            json!([agent_json(1, "a", "inactive"), agent_json(2, "b", "active")]),
        );
        transport.respond(
            Method::GET,
            "/api/v1/agents/active",
            json!([agent_json(2, "b", "active")]),
        );
        let store = AgentStore::new(transport.client());

        store.fetch_all().await.unwrap();
        assert_eq!(store.items().len(), 2);

        let active = store.fetch_active().await.unwrap();

        assert_eq!(active.len(), 1);
        assert_eq!(store.items(), active);
        assert_eq!(store.items()[0].state, AgentState::Active);
    }

    #[tokio::test]
    async fn test_create_posts_defaults_and_refetches() {
        let transport = ScriptedTransport::new();
        transport.respond(Method::POST, "/api/v1/agents/", agent_json(3, "coder", "inactive"));
        transport.respond(
            Method::GET,
            "/api/v1/agents/",
            json!([agent_json(3, "coder", "inactive")]),
        );
        let store = AgentStore::new(transport.client());

        let created = store.create(&AgentIn::new("coder", 1)).await.unwrap();

        assert_eq!(created.id, 3);
        assert_eq!(store.items().len(), 1);
        let body = transport.requests()[0].body.clone().unwrap();
        assert_eq!(body["agent_model"], "deepseek-r1-distill-qwen-32b");
        assert_eq!(body["state"], "inactive");
    }

    #[tokio::test]
    async fn test_update_uses_put() {
        let transport = ScriptedTransport::new();
        transport.respond(Method::PUT, "/api/v1/agents/2", agent_json(2, "b", "active"));
        transport.respond(Method::GET, "/api/v1/agents/", json!([agent_json(2, "b", "active")]));
        let store = AgentStore::new(transport.client());

        let update = AgentUpdate {
            state: Some(AgentState::Active),
            ..Default::default()
        };
        store.update(2, &update).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].body, Some(json!({"state": "active"})));
        assert_eq!(
            transport.calls(),
            vec!["PUT /api/v1/agents/2", "GET /api/v1/agents/"]
        );
    }
}
