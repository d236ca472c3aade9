//! Scripted adapter for the `LlmClient` port.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

/// Serves a fixed queue of canned completions, in order.
///
/// Each queued entry is either a response text or an error message. An
/// exhausted (or empty) script fails every further call, which is exactly
/// what the `--offline` demo wants: every gateway operation exercises its
/// fallback path.
#[derive(Clone)]
pub struct ScriptedLlmClient {
    script: Arc<Mutex<VecDeque<Result<String, String>>>>,
}

impl ScriptedLlmClient {
    /// Creates a client with no scripted responses; every call fails.
    #[must_use]
    pub fn failing() -> Self {
        Self { script: Arc::new(Mutex::new(VecDeque::new())) }
    }

    /// Creates a client that serves the given results in order.
    #[must_use]
    pub fn with_script(script: Vec<Result<String, String>>) -> Self {
        Self { script: Arc::new(Mutex::new(script.into_iter().collect())) }
    }

    /// Queues one successful response.
    ///
    /// # Panics
    ///
    /// Panics if another holder of this client panicked mid-access.
    pub fn push_response(&self, text: impl Into<String>) {
        self.script.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queues one failure.
    ///
    /// # Panics
    ///
    /// Panics if another holder of this client panicked mid-access.
    pub fn push_error(&self, message: impl Into<String>) {
        self.script.lock().unwrap().push_back(Err(message.into()));
    }
}

impl LlmClient for ScriptedLlmClient {
    fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
        let next = self.script.lock().unwrap().pop_front();
        Box::pin(async move {
            match next {
                Some(Ok(text)) => Ok(CompletionResponse { text }),
                Some(Err(message)) => Err(message.into()),
                None => Err("no scripted response available".into()),
            }
        })
    }
}
