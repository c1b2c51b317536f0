use std::fmt;

use async_trait::async_trait;
use docy_client::{ApiClient, ApiError, Result};

/// Binds an entity kind to its key, record and payload types and to the API
/// calls that read and write it. `EntityStore` is generic over this.
#[async_trait]
pub trait Resource: Send + Sync + Sized + 'static {
    type Key: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static;
    /// Element of the list endpoint.
    type Record: Clone + fmt::Debug + Send + Sync + 'static;
    /// What the single-record endpoint returns; becomes `current`.
    type Detail: Clone + fmt::Debug + Send + Sync + 'static;
    type Create: Send + Sync;
    type Created: Send;
    type Update: Send + Sync;
    type Updated: Send;
    /// Client-only state kept next to the mirrored records.
    type Local: Clone + Default + fmt::Debug + Send + Sync + 'static;

    /// Entity name used in logs and errors.
    const NAME: &'static str;

    fn detail_key(detail: &Self::Detail) -> Self::Key;

    /// Reject keys that can never be valid before any request goes out.
    fn check_key(_key: &Self::Key) -> Result<()> {
        Ok(())
    }

    async fn list(api: &ApiClient) -> Result<Vec<Self::Record>>;

    async fn get(api: &ApiClient, key: &Self::Key) -> Result<Self::Detail>;

    async fn create(api: &ApiClient, payload: &Self::Create) -> Result<Self::Created>;

    async fn update(
        api: &ApiClient,
        key: &Self::Key,
        payload: &Self::Update,
    ) -> Result<Self::Updated>;
}

/// Server ids are positive integers.
pub fn check_positive_id(entity: &str, id: i64) -> Result<()> {
    if id > 0 {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "Invalid {entity} id {id}: ids are positive integers"
        )))
    }
}
