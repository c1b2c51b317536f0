use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    #[default]
    Default,
    Code,
    Brainstorm,
}

/// Backing LLM of an agent
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AgentModel {
    #[default]
    #[serde(rename = "deepseek-r1-distill-qwen-32b")]
    GroqDefault,
    #[serde(rename = "groq_code")]
    GroqCode,
    #[serde(rename = "groq_brainstorm")]
    GroqBrainstorm,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    Active,
    #[default]
    Inactive,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgentOut {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub system_prompt_id: Option<i64>,
    #[serde(default)]
    pub agent_type: AgentType,
    #[serde(default)]
    pub agent_model: AgentModel,
    #[serde(default)]
    pub state: AgentState,
    /// Tasks assigned to the agent, opaque to the client.
    #[serde(default)]
    pub tasks: Option<Vec<serde_json::Value>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AgentIn {
    pub name: String,
    pub system_prompt_id: i64,
    #[serde(default)]
    pub agent_type: AgentType,
    #[serde(default)]
    pub agent_model: AgentModel,
    #[serde(default)]
    pub state: AgentState,
}

impl AgentIn {
    pub fn new(name: impl Into<String>, system_prompt_id: i64) -> Self {
        Self {
            name: name.into(),
            system_prompt_id,
            agent_type: AgentType::default(),
            agent_model: AgentModel::default(),
            state: AgentState::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AgentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<AgentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_model: Option<AgentModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<AgentState>,
}
