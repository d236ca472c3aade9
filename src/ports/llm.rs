//! LLM client port for language-model completions.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Boxed future type alias used by [`LlmClient`] to keep the trait
/// dyn-compatible.
pub type CompletionFuture<'a> = Pin<
    Box<dyn Future<Output = Result<CompletionResponse, Box<dyn Error + Send + Sync>>> + Send + 'a>,
>;

/// A request for one structured completion from the model.
///
/// Every gateway operation is exactly one of these: a natural-language
/// prompt, optionally constrained by a JSON response schema, answered by
/// one response or one failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The full prompt text to send.
    pub prompt: String,
    /// JSON Schema (as a JSON value) the response must conform to, when
    /// the operation expects structured output. `None` for free-text
    /// operations like coaching.
    pub response_schema: Option<serde_json::Value>,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
}

/// The response from an LLM completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated text; JSON when a schema was requested.
    pub text: String,
}

/// Sends completion requests to a language model.
pub trait LlmClient: Send + Sync {
    /// Generates a completion for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, rate-limit,
    /// etc.). Callers inside the gateway convert every error into a
    /// deterministic fallback before it can reach the rest of the system.
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_>;
}
