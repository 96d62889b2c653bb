//! Client for an OpenAI-compatible chat-completion API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;
use crate::response::{ensure_success, parse_json};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const CHAT_MODEL: &str = "gpt-3.5-turbo";
pub const CHAT_TEMPERATURE: f32 = 0.7;
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(30);

/// Returned in place of the completion text when the API sends none.
pub const NO_CONTENT_PLACEHOLDER: &str = "No content available";

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl CompletionResponse {
    fn into_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_else(|| NO_CONTENT_PLACEHOLDER.to_string())
    }
}

/// Sends single-message prompts to the chat-completion endpoint.
pub struct ChatCompletionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ChatCompletionClient {
    /// Create a client with the fixed 30 second request timeout.
    ///
    /// * `base_url` - API root, e.g. `https://api.openai.com`.
    pub fn new(base_url: String, api_key: String) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder().timeout(CHAT_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Send `prompt` as a single user message and return the first choice's
    /// text, or [`NO_CONTENT_PLACEHOLDER`] when the response carries none.
    pub async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        let request = CompletionRequest {
            model: CHAT_MODEL,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: CHAT_TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let response = ensure_success(response).await?;
        let completion: CompletionResponse = parse_json(response).await?;
        Ok(completion.into_content())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_of(body: serde_json::Value) -> String {
        serde_json::from_value::<CompletionResponse>(body)
            .unwrap()
            .into_content()
    }

    #[test]
    fn request_serializes_fixed_model_and_temperature() {
        let request = CompletionRequest {
            model: CHAT_MODEL,
            messages: [ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: CHAT_TEMPERATURE,
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn first_choice_content_is_extracted() {
        let body = serde_json::json!({
            "choices": [
                { "message": { "role": "assistant", "content": "first" } },
                { "message": { "role": "assistant", "content": "second" } },
            ]
        });
        assert_eq!(content_of(body), "first");
    }

    #[test]
    fn missing_choices_yield_placeholder() {
        assert_eq!(content_of(serde_json::json!({})), NO_CONTENT_PLACEHOLDER);
        assert_eq!(
            content_of(serde_json::json!({ "choices": [] })),
            NO_CONTENT_PLACEHOLDER
        );
    }

    #[test]
    fn missing_message_or_content_yield_placeholder() {
        assert_eq!(
            content_of(serde_json::json!({ "choices": [{}] })),
            NO_CONTENT_PLACEHOLDER
        );
        assert_eq!(
            content_of(serde_json::json!({ "choices": [{ "message": { "content": null } }] })),
            NO_CONTENT_PLACEHOLDER
        );
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client = ChatCompletionClient::new("http://localhost:1/".into(), "k".into()).unwrap();
        assert_eq!(client.base_url, "http://localhost:1");
    }
}
