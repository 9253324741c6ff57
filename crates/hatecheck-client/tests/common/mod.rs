//! Shared test helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use hatecheck_client::{ClassificationClient, ClientConfig, RawResponse, ServiceError, Transport};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

pub const BASE_URL: &str = "http://classifier.test:5000";

/// One request as seen by the scripted transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
}

/// Replays canned replies in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<RawResponse, ServiceError>>>,
    requests: Mutex<Vec<Recorded>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, reply: Result<RawResponse, ServiceError>) -> &Self {
        self.replies.lock().push_back(reply);
        self
    }

    pub fn push_json(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(RawResponse {
            status,
            body: body.as_bytes().to_vec(),
        }))
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    fn next(&self, recorded: Recorded) -> Result<RawResponse, ServiceError> {
        self.requests.lock().push(recorded.clone());
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply left for {:?}", recorded))
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, ServiceError> {
        self.next(Recorded {
            method: "GET",
            url: url.to_string(),
            body: None,
        })
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<RawResponse, ServiceError> {
        self.next(Recorded {
            method: "POST",
            url: url.to_string(),
            body: Some(body.clone()),
        })
    }
}

pub fn scripted_client(transport: Arc<ScriptedTransport>) -> ClassificationClient {
    let config = ClientConfig::new(BASE_URL).unwrap();
    ClassificationClient::with_transport(config, transport)
}
