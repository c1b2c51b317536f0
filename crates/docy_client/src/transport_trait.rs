use async_trait::async_trait;
use serde_json::Value;

use crate::api::request::ApiRequest;
use crate::error::Result;

/// Turns a request descriptor into either response data or an error, never both.
///
/// `Ok(None)` means the server answered successfully without a payload
/// (empty body, `null` or 204).
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<Option<Value>>;
}
