use async_trait::async_trait;
use docy_client::{ApiClient, Result};
use docy_core::models::{
    ChatCreate, ChatRead, ChatReadWithMessages, ChatUpdate, MessageCreate, MessageRead,
};
use log::debug;

use crate::error::StoreResult;
use crate::resource::{check_positive_id, Resource};
use crate::store::{EntityStore, Settle};

pub struct Chats;

#[async_trait]
impl Resource for Chats {
    type Key = i64;
    type Record = ChatRead;
    type Detail = ChatReadWithMessages;
    type Create = ChatCreate;
    type Created = ChatRead;
    type Update = ChatUpdate;
    type Updated = ChatRead;
    type Local = ();

    const NAME: &'static str = "chat";

    fn detail_key(detail: &ChatReadWithMessages) -> i64 {
        detail.id
    }

    fn check_key(key: &i64) -> Result<()> {
        check_positive_id(Self::NAME, *key)
    }

    async fn list(api: &ApiClient) -> Result<Vec<ChatRead>> {
        api.list_chats().await
    }

    async fn get(api: &ApiClient, key: &i64) -> Result<ChatReadWithMessages> {
        api.get_chat(*key).await
    }

    async fn create(api: &ApiClient, payload: &ChatCreate) -> Result<ChatRead> {
        api.create_chat(payload).await
    }

    async fn update(api: &ApiClient, key: &i64, payload: &ChatUpdate) -> Result<ChatRead> {
        api.update_chat(*key, payload).await
    }
}

pub type ChatStore = EntityStore<Chats>;

impl EntityStore<Chats> {
    /// Messages of the selected chat, empty when nothing is selected.
    pub fn current_messages(&self) -> Vec<MessageRead> {
        self.current()
            .map(|chat| chat.messages)
            .unwrap_or_default()
    }

    /// Post a message. When the chat is the selected one it is reloaded so
    /// `current` carries the server's view of the conversation.
    pub async fn send_message(
        &self,
        chat_id: i64,
        message: &MessageCreate,
    ) -> StoreResult<MessageRead> {
        let selected = self.is_selected(&chat_id);
        let settle = if selected { Settle::Continue } else { Settle::Done };

        let api = self.api();
        let call = async {
            check_positive_id(Chats::NAME, chat_id)?;
            api.send_message(chat_id, message).await
        };
        let sent = self.run_write(settle, call, |_, _| {}).await?;

        if selected {
            if let Err(err) = self.fetch_one(chat_id).await {
                debug!("Reloading chat {} after send failed: {}", chat_id, err);
            }
        }
        Ok(sent)
    }

    /// Fetch a chat's messages. They replace `current.messages` when that chat
    /// is selected.
    pub async fn fetch_messages(&self, chat_id: i64) -> StoreResult<Vec<MessageRead>> {
        let api = self.api();
        let call = async {
            check_positive_id(Chats::NAME, chat_id)?;
            api.list_messages(chat_id).await
        };
        self.run(Settle::Done, call, |state, messages| {
            if let Some(chat) = state.current.as_mut().filter(|chat| chat.id == chat_id) {
                chat.messages = messages.clone();
            }
        })
        .await
    }
}
