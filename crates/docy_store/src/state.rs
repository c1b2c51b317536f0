use std::fmt;

use docy_client::ApiError;

use crate::resource::Resource;

/// Sequence number a store hands out to each operation it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Client-side mirror of one entity kind.
pub struct StoreState<R: Resource> {
    /// Records in server order, replaced wholesale on every successful list.
    pub items: Vec<R::Record>,
    /// The selected record, if any.
    pub current: Option<R::Detail>,
    /// True while the most recently started operation is in flight.
    pub pending: bool,
    /// Failure of the most recent operation; cleared when a new one starts.
    pub last_error: Option<ApiError>,
    /// Client-only data that never goes to the server.
    pub local: R::Local,
}

impl<R: Resource> StoreState<R> {
    pub fn error_message(&self) -> Option<&str> {
        self.last_error.as_ref().map(ApiError::message)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<R: Resource> Default for StoreState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            pending: false,
            last_error: None,
            local: R::Local::default(),
        }
    }
}

impl<R: Resource> Clone for StoreState<R> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            current: self.current.clone(),
            pending: self.pending,
            last_error: self.last_error.clone(),
            local: self.local.clone(),
        }
    }
}

impl<R: Resource> fmt::Debug for StoreState<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreState")
            .field("entity", &R::NAME)
            .field("items", &self.items)
            .field("current", &self.current)
            .field("pending", &self.pending)
            .field("last_error", &self.last_error)
            .field("local", &self.local)
            .finish()
    }
}
