//! Concrete stores, one per entity kind

mod agent;
mod chat;
mod file;
mod project;
mod task;

pub use agent::{AgentStore, Agents};
pub use chat::{ChatStore, Chats};
pub use file::{FileStore, Files};
pub use project::{ProjectStore, Projects};
pub use task::{TaskBoard, TaskStore, Tasks};
