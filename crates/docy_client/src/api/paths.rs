//! Endpoint paths of the docy API (v1).

pub const PROJECTS: &str = "/api/v1/projects/";
pub const AGENTS: &str = "/api/v1/agents/";
pub const ACTIVE_AGENTS: &str = "/api/v1/agents/active";
pub const CHATS: &str = "/api/v1/chat_v2/chats/";
pub const FILES: &str = "/api/v1/files/";
pub const TASKS: &str = "/api/v1/tasks/";
pub const UNASSIGNED_TASKS: &str = "/api/v1/tasks/unassigned";

pub fn project(id: i64) -> String {
    format!("/api/v1/projects/{id}")
}

pub fn user_projects(user_id: i64) -> String {
    format!("/api/v1/users/{user_id}/projects")
}

pub fn agent(id: i64) -> String {
    format!("/api/v1/agents/{id}")
}

pub fn chat(id: i64) -> String {
    format!("/api/v1/chat_v2/chats/{id}")
}

pub fn chat_messages(chat_id: i64) -> String {
    format!("/api/v1/chat_v2/chats/{chat_id}/messages/")
}

pub fn file(name: &str) -> String {
    format!("/api/v1/files/{}", urlencoding::encode(name))
}

pub fn file_content(name: &str) -> String {
    format!("/api/v1/files/{}/content", urlencoding::encode(name))
}

pub fn task(id: i64) -> String {
    format!("/api/v1/tasks/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_percent_encoded() {
        assert_eq!(file_content("my notes.md"), "/api/v1/files/my%20notes.md/content");
        assert_eq!(file("a#b"), "/api/v1/files/a%23b");
    }
}
