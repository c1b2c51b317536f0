//! Subcommands, one handler per entity store

use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use docy_core::models::{
    AgentIn, AgentModel, AgentState, AgentType, AgentUpdate, Category, ChatCreate, ChatUpdate,
    FileContent, MessageCreate, MessageType, ProjectIn, ProjectType, ProjectUpdate, TaskFilter,
    TaskIn, TaskUpdate,
};
use docy_store::{AgentStore, ChatStore, FileStore, ProjectStore, TaskStore};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::render::{self, Output};

/// Parse a value by its wire name, e.g. `in_progress` or `groq_code`.
fn wire<T: DeserializeOwned>(value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("unknown value '{value}'"))
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List all projects
    List,
    /// Show one project
    Get { id: i64 },
    /// Create a project
    Create {
        name: String,
        #[arg(long = "type", default_value = "default", value_parser = wire::<ProjectType>)]
        project_type: ProjectType,
        #[arg(long, default_value = "")]
        framework: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// Change fields of a project
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type", value_parser = wire::<ProjectType>)]
        project_type: Option<ProjectType>,
        #[arg(long)]
        description: Option<String>,
    },
    /// List the projects of a user
    User { user_id: i64 },
}

pub async fn projects(store: &ProjectStore, action: ProjectCommand, out: Output) -> anyhow::Result<()> {
    match action {
        ProjectCommand::List => {
            let items = store.fetch_all().await?;
            out.show(&items, |items| render::list(items, render::project_line))
        }
        ProjectCommand::Get { id } => {
            let project = store.fetch_one(id).await?;
            out.show(&project, render::project_detail)
        }
        ProjectCommand::Create {
            name,
            project_type,
            framework,
            description,
            user_id,
        } => {
            let mut payload = ProjectIn::new(name, project_type, framework);
            payload.description = description;
            payload.user_id = user_id;
            let created = store.create(&payload).await?;
            out.show(&created, render::project_detail)
        }
        ProjectCommand::Update {
            id,
            name,
            project_type,
            description,
        } => {
            let update = ProjectUpdate {
                name,
                project_type,
                description,
                user_id: None,
            };
            let updated = store.update(id, &update).await?;
            out.show(&updated, render::project_detail)
        }
        ProjectCommand::User { user_id } => {
            let items = store.fetch_user_projects(user_id).await?;
            out.show(&items, |items| render::list(items, render::project_line))
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum AgentCommand {
    /// List all agents
    List,
    /// List active agents only
    Active,
    /// Show one agent
    Get { id: i64 },
    /// Create an agent
    Create {
        name: String,
        #[arg(long)]
        system_prompt_id: i64,
        #[arg(long = "type", default_value = "default", value_parser = wire::<AgentType>)]
        agent_type: AgentType,
        #[arg(long, value_parser = wire::<AgentModel>)]
        model: Option<AgentModel>,
    },
    /// Change fields of an agent
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        system_prompt_id: Option<i64>,
        #[arg(long = "type", value_parser = wire::<AgentType>)]
        agent_type: Option<AgentType>,
        #[arg(long, value_parser = wire::<AgentModel>)]
        model: Option<AgentModel>,
        #[arg(long, value_parser = wire::<AgentState>)]
        state: Option<AgentState>,
    },
}

pub async fn agents(store: &AgentStore, action: AgentCommand, out: Output) -> anyhow::Result<()> {
    match action {
        AgentCommand::List => {
            let items = store.fetch_all().await?;
            out.show(&items, |items| render::list(items, render::agent_line))
        }
        AgentCommand::Active => {
            let items = store.fetch_active().await?;
            out.show(&items, |items| render::list(items, render::agent_line))
        }
        AgentCommand::Get { id } => {
            let agent = store.fetch_one(id).await?;
            out.show(&agent, render::agent_line)
        }
        AgentCommand::Create {
            name,
            system_prompt_id,
            agent_type,
            model,
        } => {
            let mut payload = AgentIn::new(name, system_prompt_id);
            payload.agent_type = agent_type;
            if let Some(model) = model {
                payload.agent_model = model;
            }
            let created = store.create(&payload).await?;
            out.show(&created, render::agent_line)
        }
        AgentCommand::Update {
            id,
            name,
            system_prompt_id,
            agent_type,
            model,
            state,
        } => {
            let update = AgentUpdate {
                name,
                system_prompt_id,
                agent_type,
                agent_model: model,
                state,
            };
            let updated = store.update(id, &update).await?;
            out.show(&updated, render::agent_line)
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ChatCommand {
    /// List all chats
    List,
    /// Show a chat with its messages
    Get { id: i64 },
    /// Start a chat
    Create {
        title: String,
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// Change the title of a chat
    Rename { id: i64, title: String },
    /// List the messages of a chat
    Messages { id: i64 },
    /// Post a message and show the conversation
    Send {
        id: i64,
        content: String,
        #[arg(long = "type", default_value = "user", value_parser = wire::<MessageType>)]
        message_type: MessageType,
    },
}

pub async fn chats(store: &ChatStore, action: ChatCommand, out: Output) -> anyhow::Result<()> {
    match action {
        ChatCommand::List => {
            let items = store.fetch_all().await?;
            out.show(&items, |items| render::list(items, render::chat_line))
        }
        ChatCommand::Get { id } => {
            let chat = store.fetch_one(id).await?;
            out.show(&chat, render::chat_detail)
        }
        ChatCommand::Create { title, user_id } => {
            let mut payload = ChatCreate::new(title);
            payload.user_id = user_id;
            let created = store.create(&payload).await?;
            out.show(&created, render::chat_line)
        }
        ChatCommand::Rename { id, title } => {
            let update = ChatUpdate {
                title: Some(title),
                user_id: None,
            };
            let updated = store.update(id, &update).await?;
            out.show(&updated, render::chat_line)
        }
        ChatCommand::Messages { id } => {
            let messages = store.fetch_messages(id).await?;
            out.show(&messages, |messages| render::list(messages, render::message_line))
        }
        ChatCommand::Send {
            id,
            content,
            message_type,
        } => {
            // Select the chat first so the send reloads it with the reply.
            store.fetch_one(id).await?;
            let mut message = MessageCreate::user(content);
            message.message_type = message_type;
            store.send_message(id, &message).await?;
            match store.current() {
                Some(chat) => out.show(&chat, render::chat_detail),
                None => {
                    out.done("Message sent");
                    Ok(())
                }
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum FileCommand {
    /// List files in the workspace
    List,
    /// Print a file
    Get { name: String },
    /// Create or overwrite a file
    Write {
        name: String,
        /// Inline content
        #[arg(long, conflicts_with = "from", required_unless_present = "from")]
        content: Option<String>,
        /// Read content from a local file
        #[arg(long)]
        from: Option<PathBuf>,
        /// Replace an existing file
        #[arg(long)]
        overwrite: bool,
    },
    /// Delete a file
    Delete { name: String },
}

pub async fn files(store: &FileStore, action: FileCommand, out: Output) -> anyhow::Result<()> {
    match action {
        FileCommand::List => {
            let items = store.fetch_all().await?;
            out.show(&items, |items| render::list(items, render::file_line))
        }
        FileCommand::Get { name } => {
            let file = store.fetch_one(name).await?;
            out.show(&file, render::file_detail)
        }
        FileCommand::Write {
            name,
            content,
            from,
            overwrite,
        } => {
            let content = match (content, from) {
                (Some(content), _) => content,
                (None, Some(path)) => tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => String::new(),
            };
            let message = if overwrite {
                store.update(name, &content).await?
            } else {
                store.create(&FileContent::new(name, content)).await?
            };
            out.done(&message);
            Ok(())
        }
        FileCommand::Delete { name } => {
            store.delete(&name).await?;
            out.done(&format!("Deleted {name}"));
            Ok(())
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    /// List tasks, optionally filtered
    List {
        #[arg(long)]
        project: Option<i64>,
        #[arg(long)]
        agent: Option<i64>,
    },
    /// List tasks without an agent
    Unassigned {
        #[arg(long)]
        project: Option<i64>,
    },
    /// Show one task with its subtasks
    Get { id: i64 },
    /// Create a task in a project
    Create {
        name: String,
        #[arg(long)]
        project: i64,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "coding", value_parser = wire::<Category>)]
        category: Category,
        #[arg(long)]
        agent: Option<i64>,
    },
    /// Change fields of a task
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, value_parser = wire::<Category>)]
        category: Option<Category>,
    },
    /// Delete a task
    Delete { id: i64 },
}

pub async fn tasks(store: &TaskStore, action: TaskCommand, out: Output) -> anyhow::Result<()> {
    match action {
        TaskCommand::List { project, agent } => {
            let filter = TaskFilter {
                project_id: project,
                agent_id: agent,
            };
            let items = if filter == TaskFilter::default() {
                store.fetch_all().await?
            } else {
                store.fetch_all_filtered(filter).await?
            };
            out.show(&items, |items| render::list(items, render::task_line))
        }
        TaskCommand::Unassigned { project } => {
            let items = store.fetch_unassigned(project).await?;
            out.show(&items, |items| render::list(items, render::task_line))
        }
        TaskCommand::Get { id } => {
            let task = store.fetch_one(id).await?;
            out.show(&task, render::task_detail)
        }
        TaskCommand::Create {
            name,
            project,
            description,
            category,
            agent,
        } => {
            let mut payload = TaskIn::new(name, description, project);
            payload.task_type = category;
            payload.agent_id = agent;
            let id = store.create(&payload).await?;
            out.show(&json!({ "id": id }), |_| format!("✅ Created task {id}"))
        }
        TaskCommand::Update {
            id,
            name,
            description,
            category,
        } => {
            let update = TaskUpdate {
                name,
                description,
                task_type: category,
            };
            let updated = store.update(id, &update).await?;
            out.show(&updated, render::task_detail)
        }
        TaskCommand::Delete { id } => {
            store.delete(id).await?;
            out.done(&format!("Deleted task {id}"));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docy_core::models::TaskStatus;

    #[test]
    fn wire_names_parse() {
        assert_eq!(wire::<ProjectType>("code"), Ok(ProjectType::Code));
        assert_eq!(wire::<AgentModel>("groq_code"), Ok(AgentModel::GroqCode));
        assert_eq!(wire::<TaskStatus>("ERROR"), Ok(TaskStatus::Error));
        assert!(wire::<Category>("cooking").is_err());
    }
}
