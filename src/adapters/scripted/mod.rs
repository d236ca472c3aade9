//! Deterministic adapters for tests and offline use.

pub mod clock;
pub mod id_gen;
pub mod llm;

pub use clock::ManualClock;
pub use id_gen::SequenceIdGenerator;
pub use llm::ScriptedLlmClient;
