//! # Docy stores
//!
//! One store per entity kind (projects, agents, chats, files, tasks). Each
//! store mirrors the server's records locally and tracks whether a request is
//! in flight and how the last one failed. Consumers read state through
//! snapshots or a `watch` subscription and trigger the async operations.
//!
//! Responses to requests that were overtaken by a newer request on the same
//! store are discarded, so the visible state always belongs to the most
//! recently started operation.

pub mod context;
pub mod error;
pub mod resource;
pub mod state;
pub mod store;
pub mod stores;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use context::Stores;
pub use error::{StoreError, StoreResult};
pub use resource::Resource;
pub use state::{RequestId, StoreState};
pub use store::EntityStore;
pub use stores::{
    AgentStore, Agents, ChatStore, Chats, FileStore, Files, ProjectStore, Projects, TaskBoard,
    TaskStore, Tasks,
};
