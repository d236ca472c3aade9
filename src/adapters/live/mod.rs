//! Live adapters backed by the real system and network.

pub mod clock;
pub mod id_gen;
pub mod llm;

pub use clock::SystemClock;
pub use id_gen::UuidIdGenerator;
pub use llm::AnthropicClient;
