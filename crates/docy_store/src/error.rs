//! Store error types

use docy_client::ApiError;
use thiserror::Error;

use crate::state::RequestId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The operation failed; the same error is recorded as the store's `last_error`.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A newer request on the same store started before this read finished.
    /// The response was dropped without touching the store. Writes never
    /// report this; their server result is always returned.
    #[error("{entity} request {request} was superseded by a newer request")]
    Superseded {
        entity: &'static str,
        request: RequestId,
    },
}

impl StoreError {
    pub fn is_superseded(&self) -> bool {
        matches!(self, StoreError::Superseded { .. })
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            StoreError::Api(err) => Some(err),
            StoreError::Superseded { .. } => None,
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
