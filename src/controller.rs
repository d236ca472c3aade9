//! Top-level session controller.
//!
//! Owns the view state, the ordered task list, the task cursor, the user
//! state, and the focus session, and is the only place any of them
//! mutate. All methods take `&mut self`, so overlapping in-flight
//! assistant calls cannot happen by construction: each call is awaited to
//! completion before the next user action can be applied.

use std::time::Duration;

use log::debug;

use crate::assistant::{self, OrganizedPlan};
use crate::context::ServiceContext;
use crate::domain::{Level, Task, UserState};
use crate::focus::FocusSession;
use crate::plan::{self, Direction};

/// Encouragement lines shown on the celebration screen.
pub const QUOTES: [&str; 5] = [
    "Progress over perfection.",
    "You don't have to feel like it to do it.",
    "One small step is better than no steps.",
    "Action creates motivation, not the other way around.",
    "Be gentle with yourself. You're doing great.",
];

/// Celebration linger time when another task is queued up.
const DWELL_MORE_TASKS: Duration = Duration::from_millis(2500);
/// Celebration linger time when the whole plan is finished.
const DWELL_DAY_DONE: Duration = Duration::from_millis(3000);

/// The five top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Stats, energy check-in, entry point to planning.
    Dashboard,
    /// Free-text capture of everything on the user's mind.
    BrainDump,
    /// The structured plan: review, edit, refine.
    PlanReview,
    /// One task, one countdown.
    Focus,
    /// Transient pat-on-the-back after a completion.
    Celebration,
}

/// Orchestrates the whole session: view transitions, the task cursor,
/// and completion stats.
pub struct SessionController {
    ctx: ServiceContext,
    view: View,
    user: UserState,
    tasks: Vec<Task>,
    cursor: usize,
    message: String,
    focus: Option<FocusSession>,
    celebration_more_tasks: bool,
}

impl SessionController {
    /// Creates a controller on the dashboard with an empty plan.
    #[must_use]
    pub fn new(ctx: ServiceContext, user: UserState) -> Self {
        Self {
            ctx,
            view: View::Dashboard,
            user,
            tasks: Vec::new(),
            cursor: 0,
            message: String::new(),
            focus: None,
            celebration_more_tasks: false,
        }
    }

    /// The current view.
    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    /// The user state.
    #[must_use]
    pub fn user(&self) -> &UserState {
        &self.user
    }

    /// The ordered task list.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The latest assistant message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The current cursor position into the task list.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The task the cursor points at, if any.
    #[must_use]
    pub fn current_task(&self) -> Option<&Task> {
        self.tasks.get(self.cursor)
    }

    /// Total estimated minutes across the plan.
    #[must_use]
    pub fn total_minutes(&self) -> u64 {
        plan::total_duration(&self.tasks)
    }

    /// The bound focus session, while one exists.
    #[must_use]
    pub fn focus(&self) -> Option<&FocusSession> {
        self.focus.as_ref()
    }

    // --- Dashboard ---

    /// Records the user's self-reported energy. Only available on the
    /// dashboard; applied immediately with no transition.
    pub fn set_energy(&mut self, energy: Level) {
        if self.view == View::Dashboard {
            self.user.energy = energy;
        }
    }

    /// Dashboard → brain dump.
    pub fn start_brain_dump(&mut self) {
        if self.view == View::Dashboard {
            self.view = View::BrainDump;
        }
    }

    // --- Brain dump ---

    /// Sends the raw dump to the assistant and moves to plan review.
    ///
    /// Blank text is rejected before any call is made. Otherwise the
    /// transition always happens — organize cannot fail, only fall back —
    /// and any prior plan is fully replaced.
    pub async fn submit_brain_dump(&mut self, raw_text: &str) {
        if self.view != View::BrainDump || raw_text.trim().is_empty() {
            return;
        }
        let OrganizedPlan { tasks, message } =
            assistant::organize(&self.ctx, raw_text, self.user.energy).await;
        debug!("brain dump organized into {} tasks", tasks.len());
        self.tasks = tasks;
        self.message = message;
        self.cursor = 0;
        self.focus = None;
        self.view = View::PlanReview;
    }

    // --- Plan review ---

    /// Replaces the task list (and optionally the message) in place.
    ///
    /// The single entry point for both manual edits and assistant
    /// refinements; never transitions the view. The cursor is clamped if
    /// the new list is shorter than the old cursor position.
    pub fn update_tasks(&mut self, tasks: Vec<Task>, message: Option<String>) {
        if self.view != View::PlanReview {
            return;
        }
        self.tasks = tasks;
        if let Some(message) = message {
            self.message = message;
        }
        self.cursor = self.cursor.min(self.tasks.len().saturating_sub(1));
    }

    /// Swaps the task at `index` with its neighbor.
    pub fn move_task(&mut self, index: usize, direction: Direction) {
        let next = plan::move_task(&self.tasks, index, direction);
        self.update_tasks(next, None);
    }

    /// Nudges a task's estimate by `delta_minutes` (floored at 1).
    pub fn adjust_time(&mut self, id: &str, delta_minutes: i64) {
        let next = plan::adjust_time(&self.tasks, id, delta_minutes);
        self.update_tasks(next, None);
    }

    /// Deletes a task from the plan.
    pub fn delete_task(&mut self, id: &str) {
        let next = plan::delete_task(&self.tasks, id);
        self.update_tasks(next, None);
    }

    /// Asks the assistant to rework the plan from free-form feedback.
    ///
    /// Blank feedback is rejected before any call is made. A failed
    /// refinement leaves the plan untouched (the assistant guarantees
    /// that) and only updates the message.
    pub async fn refine_plan(&mut self, feedback: &str) {
        if self.view != View::PlanReview || feedback.trim().is_empty() {
            return;
        }
        let OrganizedPlan { tasks, message } =
            assistant::refine(&self.ctx, &self.tasks, feedback).await;
        self.update_tasks(tasks, Some(message));
    }

    /// Plan review → focus, binding the cursor task.
    ///
    /// A no-op with an empty plan. Each entry binds a fresh session, so
    /// coming back from review always restarts the countdown at the
    /// task's (possibly re-edited) estimate.
    pub fn start_day(&mut self) {
        if self.view != View::PlanReview {
            return;
        }
        let Some(task) = self.tasks.get(self.cursor) else {
            return;
        };
        self.focus = Some(FocusSession::bind(task));
        self.view = View::Focus;
    }

    // --- Focus ---

    /// Starts or resumes the countdown.
    pub fn start_timer(&mut self) {
        if let Some(focus) = self.focus.as_mut() {
            focus.start(self.ctx.clock.as_ref());
        }
    }

    /// Pauses the countdown.
    pub fn pause_timer(&mut self) {
        if let Some(focus) = self.focus.as_mut() {
            focus.pause(self.ctx.clock.as_ref());
        }
    }

    /// Advances the countdown from the wall clock.
    pub fn tick(&mut self) {
        if let Some(focus) = self.focus.as_mut() {
            focus.tick(self.ctx.clock.as_ref());
        }
    }

    /// The "just one minute" escape hatch.
    pub fn quick_restart(&mut self) {
        if let Some(focus) = self.focus.as_mut() {
            focus.quick_restart(self.ctx.clock.as_ref());
        }
    }

    /// Requests a micro-step breakdown for the focused task.
    pub async fn request_breakdown(&mut self) {
        if let Some(focus) = self.focus.as_mut() {
            focus.request_breakdown(&self.ctx).await;
        }
    }

    /// Flips completion on one micro-step.
    pub fn toggle_micro_step(&mut self, id: &str) {
        if let Some(focus) = self.focus.as_mut() {
            focus.toggle_micro_step(id);
        }
    }

    /// Requests a pep talk for the focused task.
    pub async fn request_coaching(&mut self) {
        if let Some(focus) = self.focus.as_mut() {
            focus.request_coaching(&self.ctx).await;
        }
    }

    /// Opens or closes the stuck-help panel.
    pub fn toggle_help(&mut self) {
        if let Some(focus) = self.focus.as_mut() {
            focus.toggle_help();
        }
    }

    /// Clears the current coaching message.
    pub fn clear_coaching(&mut self) {
        if let Some(focus) = self.focus.as_mut() {
            focus.clear_coaching();
        }
    }

    /// Marks the task completed and moves to the celebration screen.
    ///
    /// The update is optimistic — plan mutations are local and total, so
    /// there is no rollback path. Unknown ids are a no-op.
    pub fn complete(&mut self, task_id: &str) {
        if self.view != View::Focus {
            return;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return;
        };
        task.is_completed = true;
        self.user.record_completion();
        self.celebration_more_tasks = self.cursor + 1 < self.tasks.len();
        self.focus = None;
        self.view = View::Celebration;
        debug!("completed {task_id}; {} done today", self.user.tasks_completed_today);
    }

    /// Marks the task skipped and advances, or returns to the dashboard
    /// from the last task. No celebration for a skip.
    pub fn skip(&mut self, task_id: &str) {
        if self.view != View::Focus {
            return;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return;
        };
        task.is_skipped = true;
        if self.cursor + 1 < self.tasks.len() {
            self.cursor += 1;
            self.focus = Some(FocusSession::bind(&self.tasks[self.cursor]));
        } else {
            self.focus = None;
            self.view = View::Dashboard;
        }
    }

    /// Focus → plan review, touching neither tasks nor cursor. The
    /// session is dropped; re-entering focus rebinds from scratch.
    pub fn back_to_plan(&mut self) {
        if self.view == View::Focus {
            self.focus = None;
            self.view = View::PlanReview;
        }
    }

    // --- Celebration ---

    /// How long the celebration screen lingers before moving on.
    #[must_use]
    pub fn celebration_dwell(&self) -> Duration {
        if self.celebration_more_tasks { DWELL_MORE_TASKS } else { DWELL_DAY_DONE }
    }

    /// The encouragement line for this celebration, rotated by
    /// completion count.
    #[must_use]
    pub fn celebration_quote(&self) -> &'static str {
        let n = self.user.tasks_completed_today.saturating_sub(1) as usize;
        QUOTES[n % QUOTES.len()]
    }

    /// Leaves the celebration screen: on to the next task if one remains,
    /// otherwise back to the dashboard.
    pub fn finish_celebration(&mut self) {
        if self.view != View::Celebration {
            return;
        }
        if self.celebration_more_tasks {
            self.cursor += 1;
            self.focus = Some(FocusSession::bind(&self.tasks[self.cursor]));
            self.view = View::Focus;
        } else {
            self.view = View::Dashboard;
        }
    }
}
