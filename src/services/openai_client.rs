use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{Result, TravelError};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Sends one chat-completion request and returns the assistant's reply text.
#[async_trait]
pub trait ChatClient: Send + Sync + std::fmt::Debug {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String>;
}

#[derive(Clone, Debug)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl OpenAIClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn chat_completion(&self, body: &Value) -> Result<Value> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TravelError::Http(format!("Failed to build HTTP client: {err}")))?;

        let request_url = build_chat_url(&self.base_url);
        debug!(target: "trip_planner::client", url = %request_url, "sending chat completion");

        let response = client
            .post(&request_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    TravelError::Timeout(format!("chat completion timed out: {err}"))
                } else {
                    TravelError::Http(format!("HTTP request failed: {err}"))
                }
            })?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| TravelError::Http(format!("Failed to read response: {err}")))?;

        debug!(
            target: "trip_planner::client",
            status = %status,
            bytes = response_text.len(),
            "chat completion returned"
        );

        let response_json: Option<Value> = serde_json::from_str(&response_text).ok();

        if !status.is_success() {
            let api_message = response_json
                .as_ref()
                .and_then(|json| json.get("error"))
                .and_then(|error| error.get("message"))
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| response_text.clone());

            warn!(target: "trip_planner::client", status = %status, "chat completion rejected");
            return Err(TravelError::Api {
                status: status.as_u16(),
                message: api_message,
            });
        }

        let response_json = match response_json {
            Some(json) => json,
            None => serde_json::from_str(&response_text)?,
        };

        if let Some(error) = response_json.get("error") {
            let error_message = error
                .get("message")
                .and_then(|value| value.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| error.to_string());
            return Err(TravelError::Api {
                status: status.as_u16(),
                message: error_message,
            });
        }

        Ok(response_json)
    }
}

#[async_trait]
impl ChatClient for OpenAIClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String> {
        let response = self.chat_completion(&request.to_value()).await?;
        extract_reply_content(&response)
    }
}

/// Pull `choices[0].message.content` out of a chat-completion response.
pub(crate) fn extract_reply_content(response: &Value) -> Result<String> {
    response
        .get("choices")
        .and_then(|choices| choices.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(|content| content.to_string())
        .ok_or(TravelError::EmptyResponse)
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    max_tokens: Option<u32>,
    temperature: Option<f64>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: None,
            temperature: None,
        }
    }

    /// A system message followed by one user message.
    pub fn from_prompts(model: impl Into<String>, system: &str, user: &str) -> Self {
        Self::new(
            model,
            vec![
                json!({ "role": "system", "content": system }),
                json!({ "role": "user", "content": user }),
            ],
        )
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[Value] {
        &self.messages
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn to_value(&self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_chat_url() {
        assert_eq!(
            build_chat_url("https://api.openai.com/v1/"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            build_chat_url("http://localhost:1234/chat/completions"),
            "http://localhost:1234/chat/completions"
        );
    }

    #[test]
    fn test_request_body() {
        let body = ChatCompletionRequest::from_prompts("gpt-4.1-mini", "system", "user")
            .with_max_tokens(Some(3000))
            .with_temperature(0.5)
            .to_value();

        assert_eq!(body["model"], "gpt-4.1-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "user");
        assert_eq!(body["max_tokens"], 3000);
        assert_eq!(body["temperature"], 0.5);
    }

    #[test]
    fn test_extract_reply_content() {
        let response = json!({
            "choices": [{"message": {"role": "assistant", "content": "hello"}}]
        });
        assert_eq!(extract_reply_content(&response).unwrap(), "hello");

        let empty = json!({"choices": []});
        assert!(matches!(
            extract_reply_content(&empty),
            Err(TravelError::EmptyResponse)
        ));
    }
}
