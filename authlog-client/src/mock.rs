//! Mock transport for testing and development.
//!
//! Scripted per-method: push expected results in order, then inspect the
//! calls the client made. Cloning yields a handle onto the same state, so
//! a test can keep one handle while the client owns another.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::errors::{ClientError, Result};
use crate::rpc::RpcTransport;

#[derive(Default)]
struct MockState {
    responses: HashMap<String, VecDeque<Value>>,
    calls: Vec<(String, Value)>,
}

/// In-memory scripted transport.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<RwLock<MockState>>,
}

impl MockTransport {
    /// Create an empty mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a `result` value to return for the next call to `method`.
    pub fn push_response(&self, method: &str, result: Value) {
        self.state
            .write()
            .responses
            .entry(method.to_string())
            .or_default()
            .push_back(result);
    }

    /// All calls made so far, as `(method, params)` pairs.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.state.read().calls.clone()
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let mut state = self.state.write();
        state.calls.push((method.to_string(), params));
        state
            .responses
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| ClientError::Rpc {
                code: -32601,
                message: format!("no scripted response for {}", method),
            })
    }
}
