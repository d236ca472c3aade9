//! Manual plan edits.
//!
//! Every operation is total: out-of-range indices and unknown ids are
//! no-ops, never errors. Inputs are left untouched; each function returns
//! a fresh list.

use crate::domain::Task;

/// Which neighbor a task swaps with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the front of the list (earlier in the day).
    Up,
    /// Toward the back of the list (later in the day).
    Down,
}

/// Swaps the task at `index` with its neighbor in `direction`.
///
/// Moving the first task up, the last task down, or an out-of-range index
/// returns the list unchanged. The swap is purely positional; dependency
/// ordering is the model's concern, not this function's.
#[must_use]
pub fn move_task(tasks: &[Task], index: usize, direction: Direction) -> Vec<Task> {
    let mut next = tasks.to_vec();
    match direction {
        Direction::Up => {
            if index > 0 && index < next.len() {
                next.swap(index, index - 1);
            }
        }
        Direction::Down => {
            if index + 1 < next.len() {
                next.swap(index, index + 1);
            }
        }
    }
    next
}

/// Adds `delta_minutes` to the matching task's estimate, flooring at 1.
///
/// Unknown ids are a no-op.
#[must_use]
pub fn adjust_time(tasks: &[Task], id: &str, delta_minutes: i64) -> Vec<Task> {
    tasks
        .iter()
        .map(|task| {
            if task.id == id {
                let raw = i64::from(task.estimated_minutes) + delta_minutes;
                let mut task = task.clone();
                task.estimated_minutes = u32::try_from(raw.max(1)).unwrap_or(u32::MAX);
                task
            } else {
                task.clone()
            }
        })
        .collect()
}

/// Removes the task with the matching id; unknown ids are a no-op.
///
/// Remaining tasks keep their fields and relative order.
#[must_use]
pub fn delete_task(tasks: &[Task], id: &str) -> Vec<Task> {
    tasks.iter().filter(|task| task.id != id).cloned().collect()
}

/// Total estimated minutes across the whole plan.
#[must_use]
pub fn total_duration(tasks: &[Task]) -> u64 {
    tasks.iter().map(|task| u64::from(task.estimated_minutes)).sum()
}
