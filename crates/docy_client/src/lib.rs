pub mod api;
pub mod error;
pub mod http;
pub mod transport_trait;
pub mod utils;

pub use api::client::ApiClient;
pub use api::request::ApiRequest;
pub use docy_core::Config;
pub use error::{ApiError, Result};
pub use http::transport::HttpTransport;
pub use reqwest::Method;
pub use transport_trait::ApiTransport;
