use async_trait::async_trait;
use docy_client::{ApiClient, ApiError, Result};
use docy_core::models::{FileContent, FileInfo};

use crate::error::StoreResult;
use crate::resource::Resource;
use crate::store::{EntityStore, Settle};

/// Files in the server's workspace directory, keyed by name.
///
/// Create and update both write the whole file; the server creates or
/// overwrites. Update takes the new content.
pub struct Files;

/// Names are flat file names inside the workspace directory. Dots inside a
/// name are fine; a name that is `.` or `..` is not.
fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ApiError::validation("File name must not be empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(ApiError::validation(format!(
            "Invalid file name '{name}': path separators, '.' and '..' are not allowed"
        )));
    }
    Ok(())
}

#[async_trait]
impl Resource for Files {
    type Key = String;
    type Record = FileInfo;
    type Detail = FileContent;
    type Create = FileContent;
    type Created = String;
    type Update = String;
    type Updated = String;
    type Local = ();

    const NAME: &'static str = "file";

    fn detail_key(detail: &FileContent) -> String {
        detail.name.clone()
    }

    fn check_key(key: &String) -> Result<()> {
        check_name(key)
    }

    async fn list(api: &ApiClient) -> Result<Vec<FileInfo>> {
        api.list_files().await
    }

    async fn get(api: &ApiClient, key: &String) -> Result<FileContent> {
        api.read_file(key).await
    }

    async fn create(api: &ApiClient, payload: &FileContent) -> Result<String> {
        check_name(&payload.name)?;
        api.write_file(payload).await
    }

    async fn update(api: &ApiClient, key: &String, content: &String) -> Result<String> {
        api.write_file(&FileContent::new(key.as_str(), content.as_str()))
            .await
    }
}

pub type FileStore = EntityStore<Files>;

impl EntityStore<Files> {
    /// Delete a file, drop it from `current` if selected, then reload the list.
    pub async fn delete(&self, name: &str) -> StoreResult<()> {
        let api = self.api();
        let call = async {
            check_name(name)?;
            api.delete_file(name).await
        };
        self.run_write(Settle::Continue, call, |_, _| {}).await?;
        if self.is_selected(&name.to_string()) {
            self.clear_current();
        }
        self.refetch_all().await;
        Ok(())
    }
}
