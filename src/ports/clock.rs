//! Clock port for obtaining the current time.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// The focus-session countdown derives everything from absolute
/// wall-clock reads through this trait, so substituting a manually
/// advanced clock in tests exercises pause/resume and expiry without
/// sleeping.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
