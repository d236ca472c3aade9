//! Adapter implementations of the port traits.
//!
//! `live` talks to the real world (system clock, UUIDs, the Anthropic
//! API). `scripted` is deterministic: a manually advanced clock, a
//! counting id generator, and a canned-response LLM — used by tests and
//! by the `--offline` demo mode.

pub mod live;
pub mod scripted;
