//! Per-user session state.

use serde::{Deserialize, Serialize};

use super::task::Level;

/// Process-wide state for the single user of a session.
///
/// `streak` is maintained outside this crate (it counts days, and this
/// crate never crosses a day boundary); `tasks_completed_today` is owned
/// here and increments by exactly one per completed task, never going
/// back down within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    /// Display name used in greetings.
    pub name: String,
    /// Most recent self-reported energy level.
    pub energy: Level,
    /// Consecutive-day usage counter, externally maintained.
    pub streak: u32,
    /// Tasks completed since this session started.
    pub tasks_completed_today: u32,
}

impl UserState {
    /// Creates state for a new session with nothing completed yet.
    #[must_use]
    pub fn new(name: impl Into<String>, streak: u32) -> Self {
        Self { name: name.into(), energy: Level::Medium, streak, tasks_completed_today: 0 }
    }

    /// Records one task completion.
    pub fn record_completion(&mut self) {
        self.tasks_completed_today += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_defaults_to_medium_energy() {
        let user = UserState::new("Friend", 4);
        assert_eq!(user.energy, Level::Medium);
        assert_eq!(user.streak, 4);
        assert_eq!(user.tasks_completed_today, 0);
    }

    #[test]
    fn record_completion_increments_by_one() {
        let mut user = UserState::new("Friend", 0);
        user.record_completion();
        user.record_completion();
        assert_eq!(user.tasks_completed_today, 2);
    }
}
