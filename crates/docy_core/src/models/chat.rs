use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    User,
    Agent,
    System,
    Default,
}

/// Chat list entry
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatRead {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Chat together with its messages, in chronological order
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatReadWithMessages {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub messages: Vec<MessageRead>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatCreate {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl ChatCreate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            user_id: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MessageRead {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub message_type: MessageType,
    #[serde(default)]
    pub chat_id: Option<i64>,
    #[serde(default)]
    pub artifact_id: Option<i64>,
}

/// New message; the chat is addressed by the request path
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MessageCreate {
    pub content: String,
    #[serde(default)]
    pub message_type: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<i64>,
}

impl MessageCreate {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            message_type: MessageType::User,
            artifact_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_without_messages_decodes_empty() {
        let chat: ChatReadWithMessages =
            serde_json::from_value(json!({"id": 1, "title": "hello"})).unwrap();
        assert!(chat.messages.is_empty());
        assert_eq!(chat.user_id, None);
    }
}
