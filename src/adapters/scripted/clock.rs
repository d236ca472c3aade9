//! Manually advanced clock for deterministic timing tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::ports::clock::Clock;

/// A clock that only moves when told to.
///
/// Clones share the same underlying instant, so a test can hold one
/// handle and advance time while the code under test reads another.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Creates a clock fixed at an arbitrary (but stable) epoch.
    #[must_use]
    pub fn new() -> Self {
        let epoch = Utc.with_ymd_and_hms(2024, 6, 15, 9, 0, 0).unwrap();
        Self::starting_at(epoch)
    }

    /// Creates a clock fixed at the given instant.
    #[must_use]
    pub fn starting_at(instant: DateTime<Utc>) -> Self {
        Self { now: Arc::new(Mutex::new(instant)) }
    }

    /// Moves the clock forward by `seconds`.
    ///
    /// # Panics
    ///
    /// Panics if another holder of this clock panicked mid-access.
    pub fn advance_secs(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap();
        *now += Duration::seconds(seconds);
    }

    /// Moves the clock forward by `millis`.
    ///
    /// # Panics
    ///
    /// Panics if another holder of this clock panicked mid-access.
    pub fn advance_millis(&self, millis: i64) {
        let mut now = self.now.lock().unwrap();
        *now += Duration::milliseconds(millis);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
