//! In-memory transport for store tests

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use docy_client::{ApiClient, ApiError, ApiRequest, ApiTransport, Method, Result};
use serde_json::{json, Value};

#[derive(Clone)]
struct Scripted {
    result: Result<Option<Value>>,
    delay: Option<Duration>,
}

/// Answers requests from per-route queues and records every request.
///
/// Responses for a route are served in the order they were scripted; the last
/// one keeps being served once the queue is down to it.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn client(self: &Arc<Self>) -> ApiClient {
        ApiClient::new(Arc::clone(self) as Arc<dyn ApiTransport>)
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.routes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    pub fn respond(&self, method: Method, path: &str, body: Value) {
        self.push(
            method,
            path,
            Scripted {
                result: Ok(Some(body)),
                delay: None,
            },
        );
    }

    pub fn respond_after(&self, method: Method, path: &str, body: Value, delay: Duration) {
        self.push(
            method,
            path,
            Scripted {
                result: Ok(Some(body)),
                delay: Some(delay),
            },
        );
    }

    pub fn respond_empty(&self, method: Method, path: &str) {
        self.push(
            method,
            path,
            Scripted {
                result: Ok(None),
                delay: None,
            },
        );
    }

    pub fn fail(&self, method: Method, path: &str, error: ApiError) {
        self.push(
            method,
            path,
            Scripted {
                result: Err(error),
                delay: None,
            },
        );
    }

    /// Requests seen so far, as `METHOD /path`.
    pub fn calls(&self) -> Vec<String> {
        self.requests().iter().map(ToString::to_string).collect()
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Option<Value>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let scripted = {
            let mut routes = self.routes.lock().unwrap_or_else(PoisonError::into_inner);
            routes
                .get_mut(&(request.method.clone(), request.path.clone()))
                .and_then(|queue| {
                    if queue.len() > 1 {
                        queue.pop_front()
                    } else {
                        queue.front().cloned()
                    }
                })
        };

        let Some(scripted) = scripted else {
            return Err(ApiError::NotFound(format!("No scripted response for {request}")));
        };
        if let Some(delay) = scripted.delay {
            tokio::time::sleep(delay).await;
        }
        scripted.result
    }
}

pub fn project_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": null,
        "framework": "",
        "project_type": "code"
    })
}

pub fn network_error() -> ApiError {
    ApiError::Network("Failed HTTP request to http://localhost:8000: connection refused".to_string())
}
