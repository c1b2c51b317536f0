use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use async_trait::async_trait;
use docy_core::Config;
use log::{debug, info, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde_json::Value;

use crate::api::request::ApiRequest;
use crate::error::{ApiError, Result};
use crate::transport_trait::ApiTransport;
use crate::utils::http_utils::{decode_body, error_message_from_body, transport_error};

const USER_AGENT_VALUE: &str = concat!("docy-client/", env!("CARGO_PKG_VERSION"));

/// `ApiTransport` over HTTP(S), with retries on transient failures.
#[derive(Clone)]
pub struct HttpTransport {
    client: Arc<ClientWithMiddleware>,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Self::build_http_client(config)?;
        let retry_client = Self::build_retry_client(client, config.max_retries);
        Ok(Self {
            client: Arc::new(retry_client),
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_http_client(config: &Config) -> anyhow::Result<Client> {
        let mut builder = Client::builder()
            .default_headers(Self::default_headers())
            .timeout(Duration::from_secs(config.timeout_secs.max(1)));
        if !config.http_proxy.is_empty() {
            builder = builder.proxy(Proxy::http(&config.http_proxy)?);
        }
        if !config.https_proxy.is_empty() {
            builder = builder.proxy(Proxy::https(&config.https_proxy)?);
        }
        builder
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {e}"))
    }

    fn build_retry_client(client: Client, max_retries: u32) -> ClientWithMiddleware {
        // Exponential backoff between 200ms and 5s
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(200), Duration::from_secs(5))
            .build_with_max_retries(max_retries);

        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }

    pub fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Option<Value>> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!("Sending {} request to {}", request.method, url);
        let start_time = Instant::now();

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(&url, &e))?;
        let status = response.status();
        info!(
            "{} {} -> {} after {:?}",
            request.method,
            url,
            status,
            start_time.elapsed()
        );

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response from {url}: {e}")))?;

        if !status.is_success() {
            let message = error_message_from_body(&body);
            warn!("{} {} failed with {}: {}", request.method, url, status, message);
            return Err(ApiError::from_status(status.as_u16(), message));
        }

        decode_body(&body)
    }
}
