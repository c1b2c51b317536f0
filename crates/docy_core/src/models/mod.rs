//! Server-defined records mirrored by the client, plus their request payloads.

mod agent;
mod chat;
mod file;
mod project;
mod task;
mod user;

pub use agent::{AgentIn, AgentModel, AgentOut, AgentState, AgentType, AgentUpdate};
pub use chat::{
    ChatCreate, ChatRead, ChatReadWithMessages, ChatUpdate, MessageCreate, MessageRead,
    MessageType,
};
pub use file::{FileContent, FileInfo};
pub use project::{ProjectIn, ProjectOut, ProjectType, ProjectUpdate};
pub use task::{
    Category, SubTaskIn, SubTaskOut, TaskFilter, TaskIn, TaskOut, TaskStatus, TaskSummary,
    TaskUpdate,
};
pub use user::User;
