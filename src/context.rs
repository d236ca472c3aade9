//! Service context bundling all port trait objects.

use crate::adapters::live::{AnthropicClient, SystemClock, UuidIdGenerator};
use crate::adapters::scripted::ScriptedLlmClient;
use crate::ports::clock::Clock;
use crate::ports::id_gen::IdGenerator;
use crate::ports::llm::LlmClient;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire
/// up different adapter sets (live, offline, or explicit test wiring).
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// ID generator for tasks and micro-steps.
    pub id_gen: Box<dyn IdGenerator>,
    /// LLM client for the assistant operations.
    pub llm: Box<dyn LlmClient>,
}

impl ServiceContext {
    /// Creates a live context: system clock, UUIDs, the Anthropic API.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(SystemClock),
            id_gen: Box::new(UuidIdGenerator),
            llm: Box::new(AnthropicClient::new()),
        }
    }

    /// Creates an offline context: real clock and ids, but an LLM client
    /// that fails every call, so each assistant operation serves its
    /// deterministic fallback. Runs without a network or API key.
    #[must_use]
    pub fn offline() -> Self {
        Self {
            clock: Box::new(SystemClock),
            id_gen: Box::new(UuidIdGenerator),
            llm: Box::new(ScriptedLlmClient::failing()),
        }
    }

    /// Creates a context from explicit port implementations.
    #[must_use]
    pub fn new(
        clock: Box<dyn Clock>,
        id_gen: Box<dyn IdGenerator>,
        llm: Box<dyn LlmClient>,
    ) -> Self {
        Self { clock, id_gen, llm }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scripted::{ManualClock, SequenceIdGenerator};
    use crate::ports::llm::CompletionRequest;

    #[test]
    fn explicit_wiring_serves_all_ports() {
        let clock = ManualClock::new();
        let ctx = ServiceContext::new(
            Box::new(clock.clone()),
            Box::new(SequenceIdGenerator::new("t")),
            Box::new(ScriptedLlmClient::failing()),
        );

        assert_eq!(ctx.clock.now(), clock.now());
        assert_eq!(ctx.id_gen.generate_id(), "t-1");
        assert_eq!(ctx.id_gen.generate_id(), "t-2");
    }

    #[tokio::test]
    async fn offline_context_fails_llm_calls() {
        let ctx = ServiceContext::offline();
        let request =
            CompletionRequest { prompt: "hello".into(), response_schema: None, max_tokens: 8 };
        assert!(ctx.llm.complete(&request).await.is_err());
    }
}
