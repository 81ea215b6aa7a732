#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    rc::Rc,
};

use deafability_web::{
    api::{ApiClient, ApiRequest, ApiResponse, Transport},
    error::ApiError,
};
use http::Method;
use serde_json::Value;

type Reply = Result<ApiResponse, ApiError>;

/// Scripted backend. Replies are queued per `METHOD path`; the last reply
/// for a route keeps being served, and unscripted routes answer 404.
#[derive(Clone, Default)]
pub struct FakeTransport {
    replies: Rc<RefCell<HashMap<String, VecDeque<Reply>>>>,
    log: Rc<RefCell<Vec<ApiRequest>>>,
}

fn key(method: &Method, path: &str) -> String {
    format!("{method} {path}")
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.replies
            .borrow_mut()
            .entry(key(&method, path))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn ok(&self, method: Method, path: &str, body: Value) -> &Self {
        self.reply(method, path, Ok(ApiResponse { status: 200, body }))
    }

    pub fn status(&self, method: Method, path: &str, status: u16) -> &Self {
        self.reply(
            method,
            path,
            Ok(ApiResponse {
                status,
                body: Value::String("boom".to_string()),
            }),
        )
    }

    pub fn offline(&self, method: Method, path: &str) -> &Self {
        self.reply(method, path, Err(ApiError::Transport("connection refused".to_string())))
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.log.borrow().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let route = key(&request.method, &request.path);
        self.log.borrow_mut().push(request);

        let mut replies = self.replies.borrow_mut();
        match replies.get_mut(&route) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or(Err(ApiError::NotFound)),
            Some(queue) => queue.front().cloned().unwrap_or(Err(ApiError::NotFound)),
            None => Ok(ApiResponse {
                status: 404,
                body: Value::Null,
            }),
        }
    }
}

pub fn client() -> (ApiClient<FakeTransport>, FakeTransport) {
    let fake = FakeTransport::new();
    (ApiClient::new(fake.clone()), fake)
}
