//! docy_core - Entity schemas and configuration for the docy API client
//!
//! This crate provides the foundational types used across the client crates:
//! - `models` - Records and payloads for projects, agents, chats, files and tasks
//! - `config` - Client configuration loaded from file and environment
//! - `paths` - Locations of the docy config directory

pub mod config;
pub mod models;
pub mod paths;

// Re-export commonly used types
pub use config::Config;
pub use models::{
    AgentIn, AgentModel, AgentOut, AgentState, AgentType, AgentUpdate, Category, ChatCreate,
    ChatRead, ChatReadWithMessages, ChatUpdate, FileContent, FileInfo, MessageCreate,
    MessageRead, MessageType, ProjectIn, ProjectOut, ProjectType, ProjectUpdate, SubTaskIn,
    SubTaskOut, TaskFilter, TaskIn, TaskOut, TaskStatus, TaskSummary, TaskUpdate, User,
};
