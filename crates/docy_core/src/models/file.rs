use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directory entry from the file listing; files are keyed by name
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    /// Modification time as the server sends it: Unix seconds in a string.
    pub modified: String,
}

impl FileInfo {
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        let secs: f64 = self.modified.trim().parse().ok()?;
        if !secs.is_finite() {
            return None;
        }
        let whole = secs.trunc() as i64;
        let nanos = ((secs - secs.trunc()) * 1e9) as u32;
        DateTime::from_timestamp(whole, nanos)
    }
}

/// File body, used for reading and writing
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FileContent {
    pub name: String,
    pub content: String,
}

impl FileContent {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}
