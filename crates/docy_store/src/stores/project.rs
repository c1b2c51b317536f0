use async_trait::async_trait;
use docy_client::{ApiClient, Result};
use docy_core::models::{ProjectIn, ProjectOut, ProjectUpdate};

use crate::error::StoreResult;
use crate::resource::{check_positive_id, Resource};
use crate::store::{EntityStore, Settle};

pub struct Projects;

#[async_trait]
impl Resource for Projects {
    type Key = i64;
    type Record = ProjectOut;
    type Detail = ProjectOut;
    type Create = ProjectIn;
    type Created = ProjectOut;
    type Update = ProjectUpdate;
    type Updated = ProjectOut;
    type Local = ();

    const NAME: &'static str = "project";

    fn detail_key(detail: &ProjectOut) -> i64 {
        detail.id
    }

    fn check_key(key: &i64) -> Result<()> {
        check_positive_id(Self::NAME, *key)
    }

    async fn list(api: &ApiClient) -> Result<Vec<ProjectOut>> {
        api.list_projects().await
    }

    async fn get(api: &ApiClient, key: &i64) -> Result<ProjectOut> {
        api.get_project(*key).await
    }

    async fn create(api: &ApiClient, payload: &ProjectIn) -> Result<ProjectOut> {
        api.create_project(payload).await
    }

    async fn update(api: &ApiClient, key: &i64, payload: &ProjectUpdate) -> Result<ProjectOut> {
        api.update_project(*key, payload).await
    }
}

pub type ProjectStore = EntityStore<Projects>;

impl EntityStore<Projects> {
    /// Projects owned by a user. Returned to the caller, not stored.
    pub async fn fetch_user_projects(&self, user_id: i64) -> StoreResult<Vec<ProjectOut>> {
        let api = self.api();
        let call = async {
            check_positive_id("user", user_id)?;
            api.list_user_projects(user_id).await
        };
        self.run(Settle::Done, call, |_, _| {}).await
    }
}
