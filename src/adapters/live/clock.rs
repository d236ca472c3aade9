//! Live clock backed by the operating system.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Reads the real wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
