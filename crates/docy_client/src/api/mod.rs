pub mod client;
pub mod paths;
pub mod request;
