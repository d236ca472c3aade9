//! The focus session: one task, one countdown.
//!
//! The countdown is anchored to an absolute wall-clock end time and every
//! read recomputes remaining time from `end_time - now`. A runtime that
//! stops scheduling ticks for a while (laptop lid, throttled background
//! tab, suspended process) therefore costs display smoothness, never
//! correctness: the next tick lands on the right value.

use chrono::{DateTime, Utc};

use crate::assistant::{self, COACHING_PENDING, STUCK_EMOTION};
use crate::context::ServiceContext;
use crate::domain::{MicroStep, Task};
use crate::ports::Clock;

/// Seconds granted by the "just one minute" escape hatch.
const QUICK_RESTART_SECONDS: u32 = 60;

/// Whether the countdown is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// Stopped; remaining time holds its last value.
    Idle,
    /// Counting down toward a stored wall-clock end time.
    Running,
}

/// A countdown-based execution session bound to exactly one task.
///
/// A session holds no state across tasks: binding a new task means
/// constructing a new session, which also guarantees a stale tick from a
/// previous task has nothing left to fire against.
pub struct FocusSession {
    task_id: String,
    task_title: String,
    total_seconds: u32,
    remaining_seconds: u32,
    end_time: Option<DateTime<Utc>>,
    micro_steps: Vec<MicroStep>,
    coaching: Option<String>,
    help_open: bool,
}

impl FocusSession {
    /// Binds a fresh session to `task`: timer idle at the full estimate,
    /// no micro-steps, no coaching, help panel closed.
    #[must_use]
    pub fn bind(task: &Task) -> Self {
        let total_seconds = task.estimated_minutes.saturating_mul(60);
        Self {
            task_id: task.id.clone(),
            task_title: task.title.clone(),
            total_seconds,
            remaining_seconds: total_seconds,
            end_time: None,
            micro_steps: Vec::new(),
            coaching: None,
            help_open: false,
        }
    }

    /// Id of the bound task.
    #[must_use]
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Title of the bound task.
    #[must_use]
    pub fn task_title(&self) -> &str {
        &self.task_title
    }

    /// Current timer state.
    #[must_use]
    pub fn state(&self) -> TimerState {
        if self.end_time.is_some() { TimerState::Running } else { TimerState::Idle }
    }

    /// Seconds left on the countdown, as of the last clock read.
    #[must_use]
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Fraction of the estimate already elapsed, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total_seconds == 0 {
            return 1.0;
        }
        f64::from(self.total_seconds - self.remaining_seconds) / f64::from(self.total_seconds)
    }

    /// Starts (or resumes) the countdown from the current remaining time.
    ///
    /// The end time is an absolute target, so a resume after five seconds
    /// or five hours picks up exactly where the pause left off.
    pub fn start(&mut self, clock: &dyn Clock) {
        if self.end_time.is_none() {
            self.end_time =
                Some(clock.now() + chrono::Duration::seconds(i64::from(self.remaining_seconds)));
        }
    }

    /// Pauses the countdown; the remaining time at this instant becomes
    /// the new baseline.
    pub fn pause(&mut self, clock: &dyn Clock) {
        if self.end_time.is_some() {
            self.tick(clock);
            self.end_time = None;
        }
    }

    /// Recomputes remaining time from the stored end time.
    ///
    /// On expiry the remaining time clamps to zero and the timer goes
    /// idle. A no-op while idle, so a late tick after pause or rebind is
    /// harmless.
    pub fn tick(&mut self, clock: &dyn Clock) -> TimerState {
        let Some(end_time) = self.end_time else {
            return TimerState::Idle;
        };

        let millis_left = (end_time - clock.now()).num_milliseconds();
        if millis_left <= 0 {
            self.remaining_seconds = 0;
            self.end_time = None;
            return TimerState::Idle;
        }

        // Ceiling so the display never shows 0 while time is left.
        self.remaining_seconds = u32::try_from((millis_left + 999) / 1000).unwrap_or(u32::MAX);
        TimerState::Running
    }

    /// Sets the timer to sixty seconds and starts immediately, dismissing
    /// the help panel.
    pub fn quick_restart(&mut self, clock: &dyn Clock) {
        self.remaining_seconds = QUICK_RESTART_SECONDS;
        self.end_time =
            Some(clock.now() + chrono::Duration::seconds(i64::from(QUICK_RESTART_SECONDS)));
        self.help_open = false;
    }

    /// Asks the assistant to break the bound task into micro-steps and
    /// installs them. The timer is untouched; the help panel closes.
    pub async fn request_breakdown(&mut self, ctx: &ServiceContext) {
        let steps = assistant::break_down(ctx, &self.task_title).await;
        self.micro_steps = steps;
        self.help_open = false;
    }

    /// The installed micro-steps, if a breakdown was requested.
    #[must_use]
    pub fn micro_steps(&self) -> &[MicroStep] {
        &self.micro_steps
    }

    /// Flips completion on the matching micro-step; unknown ids are a
    /// no-op. Works in any timer state.
    pub fn toggle_micro_step(&mut self, id: &str) {
        if let Some(step) = self.micro_steps.iter_mut().find(|step| step.id == id) {
            step.is_completed = !step.is_completed;
        }
    }

    /// True once every installed micro-step is checked off (and at least
    /// one exists). Surfaces the one-tap complete path; completing the
    /// task itself stays an explicit user action.
    #[must_use]
    pub fn all_steps_done(&self) -> bool {
        !self.micro_steps.is_empty() && self.micro_steps.iter().all(|step| step.is_completed)
    }

    /// Asks the assistant for a pep talk. The pending placeholder is
    /// visible synchronously; the real text replaces it when the call
    /// resolves (or its fallback does — the call itself cannot fail).
    pub async fn request_coaching(&mut self, ctx: &ServiceContext) {
        self.coaching = Some(COACHING_PENDING.to_string());
        let message = assistant::coach(ctx, &self.task_title, STUCK_EMOTION).await;
        self.coaching = Some(message);
    }

    /// The current coaching message, if one was requested.
    #[must_use]
    pub fn coaching(&self) -> Option<&str> {
        self.coaching.as_deref()
    }

    /// Clears the coaching message ("ask something else").
    pub fn clear_coaching(&mut self) {
        self.coaching = None;
    }

    /// Opens or closes the stuck-help panel.
    pub fn toggle_help(&mut self) {
        self.help_open = !self.help_open;
    }

    /// Whether the stuck-help panel is open.
    #[must_use]
    pub fn help_open(&self) -> bool {
        self.help_open
    }
}
