use std::cell::RefCell;

use crate::chat::{ChatClient, ChatRequest};
use crate::error::{Error, Result};

/// `ChatClient` that replays queued responses and records every request.
pub struct MockChatClient {
    responses: RefCell<Vec<Result<String>>>,
    pub requests: RefCell<Vec<ChatRequest>>,
}

impl MockChatClient {
    pub fn new(responses: Vec<Result<String>>) -> Self {
        Self {
            responses: RefCell::new(responses),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn models_tried(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| r.model.clone())
            .collect()
    }
}

impl ChatClient for MockChatClient {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        self.requests.borrow_mut().push(request.clone());
        let mut responses = self.responses.borrow_mut();
        if responses.is_empty() {
            Err(Error::Transport("no more mock responses".to_string()))
        } else {
            responses.remove(0)
        }
    }
}

pub fn status(code: u16) -> Error {
    Error::ApiStatus {
        status: code,
        body: format!("{{\"error\":\"status {code}\"}}"),
    }
}

pub fn default_models() -> Vec<String> {
    vec!["gpt-4".to_string(), "gpt-3.5-turbo".to_string()]
}
