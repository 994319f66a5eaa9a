//! Recording transport for tests.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::request::{ApiRequest, ApiResponse, Method};
use crate::transport::Transport;

/// Records every request and answers from a table keyed by method and path.
/// Unknown routes answer `200 {}`.
#[derive(Default)]
pub struct MockTransport {
    calls: RefCell<Vec<ApiRequest>>,
    routes: RefCell<HashMap<(Method, String), Result<ApiResponse, ApiError>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.routes
            .borrow_mut()
            .insert((method, path.to_string()), Ok(ApiResponse { status, body }));
    }

    pub fn fail(&self, method: Method, path: &str, error: ApiError) {
        self.routes
            .borrow_mut()
            .insert((method, path.to_string()), Err(error));
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last(&self) -> Option<ApiRequest> {
        self.calls.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let key = (request.method, request.path.clone());
        self.calls.borrow_mut().push(request);
        self.routes
            .borrow()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(ApiResponse::ok(json!({}))))
    }
}
