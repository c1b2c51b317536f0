use thiserror::Error;

/// Message used when neither the server nor the transport said anything useful.
pub const FALLBACK_MESSAGE: &str = "Unknown error occurred";

/// Failure of a single API operation.
///
/// `Display` yields the human-readable message only, so the value can be shown
/// as-is; use [`ApiError::kind`] to branch on the category.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response (connect, timeout, body read).
    #[error("{0}")]
    Network(String),

    /// The server (400/422) or the client itself rejected the input.
    /// `status` is `None` when the input was rejected before any request.
    #[error("{message}")]
    Validation {
        status: Option<u16>,
        message: String,
    },

    #[error("{0}")]
    NotFound(String),

    /// Any other non-success status. `status` is 0 when a success response
    /// could not be decoded.
    #[error("{message}")]
    Server { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Classify a non-success response by status code.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = non_empty(message.into());
        match status {
            400 | 422 => ApiError::Validation {
                status: Some(status),
                message,
            },
            404 => ApiError::NotFound(message),
            _ => ApiError::Server { status, message },
        }
    }

    /// Input rejected locally, without a request.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            status: None,
            message: message.into(),
        }
    }

    pub fn malformed(detail: impl std::fmt::Display) -> Self {
        ApiError::Server {
            status: 0,
            message: format!("Malformed response: {detail}"),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Network(message)
            | ApiError::Validation { message, .. }
            | ApiError::NotFound(message)
            | ApiError::Server { message, .. } => message,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network",
            ApiError::Validation { .. } => "validation",
            ApiError::NotFound(_) => "not_found",
            ApiError::Server { .. } => "server",
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation { status, .. } => *status,
            ApiError::NotFound(_) => Some(404),
            ApiError::Server { status, .. } if *status != 0 => Some(*status),
            _ => None,
        }
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}
