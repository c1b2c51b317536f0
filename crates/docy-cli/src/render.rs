//! Text rendering of store state

use colored::Colorize;
use docy_core::models::{
    AgentOut, AgentState, ChatRead, ChatReadWithMessages, FileContent, FileInfo, MessageRead,
    MessageType, ProjectOut, TaskOut, TaskStatus,
};
use serde::Serialize;

/// Where command results go: pretty JSON or human-readable text.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    pub fn show<T: Serialize + ?Sized>(
        &self,
        value: &T,
        text: impl FnOnce(&T) -> String,
    ) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text(value));
        }
        Ok(())
    }

    pub fn done(&self, message: &str) {
        if self.json {
            println!("{}", serde_json::json!({ "message": message }));
        } else {
            println!("{}", format!("✅ {message}").green());
        }
    }
}

/// Wire name of a serde enum, e.g. `in_progress`.
pub fn label<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

pub fn list<T>(items: &[T], line: impl Fn(&T) -> String) -> String {
    if items.is_empty() {
        return "(none)".dimmed().to_string();
    }
    items.iter().map(line).collect::<Vec<_>>().join("\n")
}

pub fn project_line(project: &ProjectOut) -> String {
    format!(
        "{:>4}  {}  {}",
        project.id.to_string().cyan(),
        project.name.bold(),
        format!("[{}]", label(&project.project_type)).dimmed()
    )
}

pub fn project_detail(project: &ProjectOut) -> String {
    let mut lines = vec![project_line(project)];
    if !project.framework.is_empty() {
        lines.push(format!("      framework: {}", project.framework));
    }
    if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(format!("      {description}"));
    }
    if let Some(user) = &project.user {
        let owner = user.username.clone().unwrap_or_else(|| user.id.to_string());
        lines.push(format!("      owner: {owner}"));
    }
    lines.join("\n")
}

pub fn agent_line(agent: &AgentOut) -> String {
    let state = match agent.state {
        AgentState::Active => "active".green(),
        AgentState::Inactive => "inactive".dimmed(),
    };
    format!(
        "{:>4}  {}  {} {}  {}",
        agent.id.to_string().cyan(),
        agent.name.bold(),
        label(&agent.agent_type),
        format!("({})", label(&agent.agent_model)).dimmed(),
        state
    )
}

pub fn chat_line(chat: &ChatRead) -> String {
    format!("{:>4}  {}", chat.id.to_string().cyan(), chat.title.bold())
}

pub fn message_line(message: &MessageRead) -> String {
    let who = match message.message_type {
        MessageType::User => "you".blue(),
        MessageType::Agent => "agent".magenta(),
        MessageType::System | MessageType::Default => "system".dimmed(),
    };
    format!("{who}: {}", message.content)
}

pub fn chat_detail(chat: &ChatReadWithMessages) -> String {
    let header = format!("{:>4}  {}", chat.id.to_string().cyan(), chat.title.bold());
    if chat.messages.is_empty() {
        return format!("{header}\n{}", "(no messages)".dimmed());
    }
    format!("{header}\n{}", list(&chat.messages, message_line))
}

pub fn file_line(file: &FileInfo) -> String {
    let modified = file
        .modified_at()
        .map(|at| at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| file.modified.clone());
    format!(
        "{:>10}  {}  {}",
        file.size,
        modified.dimmed(),
        file.name.bold()
    )
}

pub fn file_detail(file: &FileContent) -> String {
    format!("{}\n{}", format!("── {} ──", file.name).cyan(), file.content)
}

fn status_label(status: Option<TaskStatus>) -> String {
    match status {
        None => "-".dimmed().to_string(),
        Some(status) => {
            let text = label(&status);
            match status {
                TaskStatus::Completed => text.green().to_string(),
                TaskStatus::InProgress => text.yellow().to_string(),
                TaskStatus::Failed | TaskStatus::Error => text.red().to_string(),
                TaskStatus::Pending => text.dimmed().to_string(),
            }
        }
    }
}

pub fn task_line(task: &TaskOut) -> String {
    let mut line = format!(
        "{:>4}  {}  {}  {}",
        task.id.to_string().cyan(),
        task.name.bold(),
        label(&task.category).dimmed(),
        status_label(task.status)
    );
    if !task.subtasks.is_empty() {
        line.push_str(&format!(
            "  {}/{} subtasks",
            task.completed_subtasks(),
            task.subtasks.len()
        ));
    }
    line
}

pub fn task_detail(task: &TaskOut) -> String {
    let mut lines = vec![task_line(task)];
    if !task.description.is_empty() {
        lines.push(format!("      {}", task.description));
    }
    for subtask in &task.subtasks {
        let mark = if subtask.is_completed { "[x]" } else { "[ ]" };
        lines.push(format!("      {mark} {}", subtask.name));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use docy_core::models::{Category, SubTaskOut};

    fn task(status: Option<TaskStatus>) -> TaskOut {
        TaskOut {
            id: 3,
            name: "ship".to_string(),
            description: "release it".to_string(),
            category: Category::Planning,
            status,
            subtasks: vec![
                SubTaskOut {
                    id: 1,
                    name: "tag".to_string(),
                    description: None,
                    is_completed: true,
                },
                SubTaskOut {
                    id: 2,
                    name: "publish".to_string(),
                    description: None,
                    is_completed: false,
                },
            ],
            agent: None,
            project: None,
        }
    }

    #[test]
    fn labels_use_wire_names() {
        assert_eq!(label(&TaskStatus::InProgress), "in_progress");
        assert_eq!(label(&TaskStatus::Error), "ERROR");
        assert_eq!(label(&Category::Planning), "planning");
    }

    #[test]
    fn task_detail_lists_subtasks() {
        let text = task_detail(&task(Some(TaskStatus::Completed)));
        assert!(text.contains("1/2 subtasks"));
        assert!(text.contains("[x] tag"));
        assert!(text.contains("[ ] publish"));
        assert!(text.contains("release it"));
    }

    #[test]
    fn empty_list_is_marked() {
        let tasks: Vec<TaskOut> = Vec::new();
        assert!(list(&tasks, task_line).contains("(none)"));
    }
}
