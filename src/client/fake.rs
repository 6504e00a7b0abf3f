//! Recording transport for tests
//!
//! Answers by request path with canned bodies and keeps every request it
//! sees so tests can assert on exactly what went over the wire.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::{ApiRequest, ApiResponse, ClientResult, Method, Transport};

#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: HashMap<String, ApiResponse>,
    method_routes: HashMap<(Method, String), ApiResponse>,
    holds: HashMap<String, Arc<Notify>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with status 200 and `body`
    pub(crate) fn respond(mut self, path: &str, body: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            ApiResponse {
                status: 200,
                body: body.to_string(),
            },
        );
        self
    }

    /// Answer `method` on `path` with status 200 and `body`, ahead of [`Self::respond`]
    pub(crate) fn respond_to(mut self, method: Method, path: &str, body: &str) -> Self {
        self.method_routes.insert(
            (method, path.to_string()),
            ApiResponse {
                status: 200,
                body: body.to_string(),
            },
        );
        self
    }

    /// Answer `path` with an error status
    pub(crate) fn fail(mut self, path: &str, status: u16) -> Self {
        self.routes.insert(
            path.to_string(),
            ApiResponse {
                status,
                body: String::new(),
            },
        );
        self
    }

    /// Park requests to `path` until the returned handle is notified
    pub(crate) fn hold(&mut self, path: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.holds.insert(path.to_string(), Arc::clone(&notify));
        notify
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Path and query of every request, in order
    pub(crate) fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r.endpoint.path_and_query())
            .collect()
    }

    /// Number of requests whose path (without query) equals `path`
    pub(crate) fn count(&self, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.endpoint.path() == path)
            .count()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let path = request.endpoint.path();
        let method = request.endpoint.method();
        self.requests.lock().unwrap().push(request);

        if let Some(notify) = self.holds.get(&path) {
            notify.notified().await;
        }

        let response = self
            .method_routes
            .get(&(method, path.clone()))
            .or_else(|| self.routes.get(&path))
            .cloned();

        Ok(response.unwrap_or(ApiResponse {
            status: 404,
            body: String::new(),
        }))
    }
}
