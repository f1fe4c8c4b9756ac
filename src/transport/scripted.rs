//! In-memory transport for unit tests.
//!
//! Replays queued payloads in order and records every call. Clones share
//! state, so a test keeps one clone for inspection after handing the other
//! to a bridge.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::protocol::Method;

use super::Transport;

/// One recorded `call`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct ScriptState {
    responses: VecDeque<Result<Value>>,
    close_results: VecDeque<Result<()>>,
    calls: Vec<RecordedCall>,
    close_count: usize,
}

/// Replays scripted responses.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful payload.
    pub fn respond(&self, payload: Value) -> &Self {
        self.state.lock().responses.push_back(Ok(payload));
        self
    }

    /// Queues a failure.
    pub fn fail(&self, error: Error) -> &Self {
        self.state.lock().responses.push_back(Err(error));
        self
    }

    /// Queues the result of the next `close`.
    pub fn close_with(&self, result: Result<()>) -> &Self {
        self.state.lock().close_results.push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().calls.clone()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.state.lock().calls.last().cloned()
    }

    pub fn close_count(&self) -> usize {
        self.state.lock().close_count
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn call(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let mut state = self.state.lock();
        state.calls.push(RecordedCall {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(Error::transport(format!("no scripted response for {path}"))))
    }

    async fn close(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.close_count += 1;
        state.close_results.pop_front().unwrap_or(Ok(()))
    }
}

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
