use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

use crate::client::transport::{Transport, TransportResult};

type Responder = Box<dyn Fn(&Value) -> TransportResult<Value> + Send + Sync>;

/// In-memory transport that records every request and answers from a closure.
pub struct ScriptedTransport {
    responder: Responder,
    log: Mutex<Vec<(String, Value)>>,
}

impl ScriptedTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&Value) -> TransportResult<Value> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Value> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|(_, body)| body.clone())
            .collect()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|(endpoint, _)| endpoint.clone())
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    /// Bodies of requests whose `request` field equals `name`.
    pub fn requests_named(&self, name: &str) -> Vec<Value> {
        self.requests()
            .into_iter()
            .filter(|body| body["request"] == name)
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(&self, endpoint: &str, payload: &Value) -> TransportResult<Value> {
        self.log
            .lock()
            .unwrap()
            .push((endpoint.to_string(), payload.clone()));
        (self.responder)(payload)
    }
}
