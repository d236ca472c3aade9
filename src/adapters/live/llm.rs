//! Live adapter for the `LlmClient` port using the Anthropic messages API.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Live LLM client that calls the Anthropic Claude API.
///
/// The model defaults to [`DEFAULT_MODEL`] and can be overridden with the
/// `DAYFLOW_MODEL` environment variable. The API key is read from
/// `ANTHROPIC_API_KEY` at call time.
pub struct AnthropicClient {
    client: Client,
    model: String,
}

impl AnthropicClient {
    /// Creates a new live LLM client, resolving the model from the
    /// environment.
    #[must_use]
    pub fn new() -> Self {
        let model = env::var("DAYFLOW_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self { client: Client::new(), model }
    }
}

impl Default for AnthropicClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Request body sent to the Anthropic messages API.
#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

/// A single message in the Anthropic API request.
#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Top-level response from the Anthropic messages API.
#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

/// A content block in the Anthropic response.
#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

/// Error response from the Anthropic API.
#[derive(Deserialize)]
struct AnthropicError {
    error: AnthropicErrorDetail,
}

/// Detail inside an Anthropic error response.
#[derive(Deserialize)]
struct AnthropicErrorDetail {
    message: String,
}

impl LlmClient for AnthropicClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let prompt = render_prompt(request);
        let max_tokens = request.max_tokens;

        Box::pin(async move {
            let api_key = env::var("ANTHROPIC_API_KEY").map_err(|_| {
                Box::<dyn std::error::Error + Send + Sync>::from(
                    "ANTHROPIC_API_KEY environment variable not set",
                )
            })?;

            let body = AnthropicRequest {
                model: &self.model,
                max_tokens,
                messages: vec![AnthropicMessage { role: "user", content: &prompt }],
            };

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Anthropic API request failed: {e}").into()
                })?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read Anthropic API response: {e}").into()
                })?;

            if !status.is_success() {
                let msg = serde_json::from_str::<AnthropicError>(&response_text)
                    .map(|e| e.error.message)
                    .unwrap_or(response_text);
                return Err(format!("Anthropic API error ({}): {msg}", status.as_u16()).into());
            }

            let api_response: AnthropicResponse = serde_json::from_str(&response_text).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse Anthropic API response: {e}").into()
                },
            )?;

            let text = api_response.content.into_iter().map(|block| block.text).collect::<String>();

            Ok(CompletionResponse { text })
        })
    }
}

/// Folds the optional response schema into the prompt text.
///
/// The messages API has no native structured-output parameter, so the
/// schema constraint travels as an explicit instruction block.
fn render_prompt(request: &CompletionRequest) -> String {
    match &request.response_schema {
        Some(schema) => format!(
            "{}\n\nRespond with a single JSON object conforming to this JSON Schema. \
             Output the JSON only — no markdown fences, no commentary.\n{}",
            request.prompt, schema
        ),
        None => request.prompt.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_prompt_without_schema_is_unchanged() {
        let request = CompletionRequest {
            prompt: "Say something kind.".into(),
            response_schema: None,
            max_tokens: 256,
        };
        assert_eq!(render_prompt(&request), "Say something kind.");
    }

    #[test]
    fn render_prompt_appends_schema_instruction() {
        let request = CompletionRequest {
            prompt: "Organize this.".into(),
            response_schema: Some(json!({"type": "object"})),
            max_tokens: 1024,
        };
        let rendered = render_prompt(&request);
        assert!(rendered.starts_with("Organize this."));
        assert!(rendered.contains("JSON Schema"));
        assert!(rendered.contains("\"type\":\"object\""));
    }
}
