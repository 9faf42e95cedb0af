use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Pull the first choice's text out of a chat-completion response body.
pub fn extract_completion(body: serde_json::Value) -> Result<String> {
    let response: ChatResponse = serde_json::from_value(body)
        .map_err(|e| Error::ApiResponse(format!("unexpected response shape: {e}")))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| Error::ApiResponse("response has no message content".to_string()))
}

// ---------------------------------------------------------------------------
// Client abstraction (for testability)
// ---------------------------------------------------------------------------

pub trait ChatClient {
    /// Send one chat-completion request and return the trimmed reply text.
    fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// Blocking client for an OpenAI-compatible chat-completion endpoint.
pub struct OpenAiClient {
    api_url: String,
    api_key: String,
    agent: ureq::Agent,
}

impl OpenAiClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl ChatClient for OpenAiClient {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        debug!(model = %request.model, url = %self.api_url, "sending chat completion");
        let result = self
            .agent
            .post(&self.api_url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_json(request);

        match result {
            Ok(response) => {
                let body: serde_json::Value = response
                    .into_json()
                    .map_err(|e| Error::ApiResponse(format!("failed to parse response: {e}")))?;
                extract_completion(body)
            }
            Err(ureq::Error::Status(status, response)) => Err(Error::ApiStatus {
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(t)) => Err(Error::Transport(t.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_omits_missing_temperature() {
        let request = ChatRequest {
            model: "gpt-4".to_string(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            temperature: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ]
            })
        );
    }

    #[test]
    fn test_request_serialization_includes_temperature() {
        let request = ChatRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage::user("hi")],
            temperature: Some(0.5),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["temperature"], serde_json::json!(0.5));
    }

    #[test]
    fn test_extract_completion_trims_first_choice() {
        let body = serde_json::json!({
            "choices": [
                {"message": {"role": "assistant", "content": "  - Use memo\n"}},
                {"message": {"role": "assistant", "content": "ignored"}}
            ]
        });
        assert_eq!(extract_completion(body).unwrap(), "- Use memo");
    }

    #[test]
    fn test_extract_completion_no_choices() {
        let body = serde_json::json!({ "choices": [] });
        let err = extract_completion(body).unwrap_err();
        assert!(matches!(err, Error::ApiResponse(_)));
    }

    #[test]
    fn test_extract_completion_wrong_shape() {
        let body = serde_json::json!({ "error": { "message": "nope" } });
        let err = extract_completion(body).unwrap_err();
        assert!(err.to_string().contains("unexpected response shape"));
    }

    #[test]
    fn test_extract_completion_null_content() {
        let body = serde_json::json!({ "choices": [{"message": {"content": null}}] });
        assert!(extract_completion(body).is_err());
    }
}
