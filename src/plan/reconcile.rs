//! Merge rule applied to an AI-rewritten plan.
//!
//! The model is free to reorder, retime, regroup, add, or drop tasks, but
//! it only ever sees a projection of the plan (id, title, duration,
//! category). Completion flags, descriptions, and micro-steps live only
//! here, so they are carried forward by id after every rewrite.

use crate::domain::{Category, Level, Task};
use crate::ports::IdGenerator;

/// One task as it comes back from a plan rewrite, before reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteItem {
    /// The id the model echoed back, if any. Missing or empty means the
    /// model added this task.
    pub id: Option<String>,
    /// Possibly revised title.
    pub title: String,
    /// Possibly revised category.
    pub category: Category,
    /// Possibly revised minute estimate.
    pub estimated_minutes: u32,
    /// Possibly revised energy requirement.
    pub energy_level: Level,
    /// Possibly revised priority.
    pub priority: Level,
}

/// Merges a rewritten plan with the prior local state.
///
/// For each rewrite item whose id matches a task in `current`, the local
/// `is_completed`, `is_skipped`, `description`, and `micro_steps` are
/// carried forward and the model's remaining fields are adopted. Items
/// with an unknown id keep it; items with no id get a fresh one from
/// `ids`. Result order is exactly the rewrite order; current tasks absent
/// from the rewrite are dropped.
#[must_use]
pub fn reconcile(current: &[Task], rewrite: Vec<RewriteItem>, ids: &dyn IdGenerator) -> Vec<Task> {
    rewrite
        .into_iter()
        .map(|item| {
            let id = match item.id {
                Some(id) if !id.trim().is_empty() => id,
                _ => ids.generate_id(),
            };
            let existing = current.iter().find(|task| task.id == id);

            Task {
                id,
                title: item.title,
                description: existing.and_then(|t| t.description.clone()),
                category: item.category,
                estimated_minutes: item.estimated_minutes.max(1),
                energy_level: item.energy_level,
                priority: item.priority,
                is_completed: existing.is_some_and(|t| t.is_completed),
                is_skipped: existing.is_some_and(|t| t.is_skipped),
                micro_steps: existing.map(|t| t.micro_steps.clone()).unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scripted::SequenceIdGenerator;
    use crate::domain::MicroStep;

    fn existing(id: &str, completed: bool) -> Task {
        let mut task =
            Task::new(id, format!("Task {id}"), Category::Work, 30, Level::Medium, Level::Medium);
        task.is_completed = completed;
        task
    }

    fn item(id: Option<&str>, title: &str) -> RewriteItem {
        RewriteItem {
            id: id.map(String::from),
            title: title.into(),
            category: Category::Home,
            estimated_minutes: 10,
            energy_level: Level::Low,
            priority: Level::High,
        }
    }

    #[test]
    fn preserves_flags_across_reorder() {
        let current = vec![existing("a", true), existing("b", false)];
        let rewrite = vec![item(Some("b"), "X"), item(Some("a"), "Y")];
        let ids = SequenceIdGenerator::new("new");

        let merged = reconcile(&current, rewrite, &ids);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "b");
        assert!(!merged[0].is_completed);
        assert_eq!(merged[1].id, "a");
        assert!(merged[1].is_completed);
    }

    #[test]
    fn adopts_model_fields_for_matched_tasks() {
        let mut task = existing("a", false);
        task.description = Some("hand-written note".into());
        let rewrite = vec![item(Some("a"), "Renamed")];
        let ids = SequenceIdGenerator::new("new");

        let merged = reconcile(&[task], rewrite, &ids);

        assert_eq!(merged[0].title, "Renamed");
        assert_eq!(merged[0].category, Category::Home);
        assert_eq!(merged[0].estimated_minutes, 10);
        // Local-only fields survive; the model never saw them.
        assert_eq!(merged[0].description.as_deref(), Some("hand-written note"));
    }

    #[test]
    fn carries_micro_steps_forward() {
        let mut task = existing("a", false);
        task.micro_steps = vec![MicroStep {
            id: "s-1".into(),
            title: "Stand up".into(),
            duration_minutes: 1,
            is_completed: true,
        }];
        let ids = SequenceIdGenerator::new("new");

        let merged = reconcile(&[task], vec![item(Some("a"), "Same task")], &ids);
        assert_eq!(merged[0].micro_steps.len(), 1);
        assert!(merged[0].micro_steps[0].is_completed);
    }

    #[test]
    fn missing_id_gets_a_fresh_one() {
        let ids = SequenceIdGenerator::new("new");
        let merged = reconcile(&[], vec![item(None, "Added"), item(Some(""), "Also added")], &ids);

        assert_eq!(merged[0].id, "new-1");
        assert_eq!(merged[1].id, "new-2");
        assert!(!merged[0].is_completed);
        assert!(merged[0].description.is_none());
        assert!(merged[0].micro_steps.is_empty());
    }

    #[test]
    fn unknown_supplied_id_is_kept_and_treated_as_new() {
        let current = vec![existing("a", true)];
        let ids = SequenceIdGenerator::new("new");

        let merged = reconcile(&current, vec![item(Some("ghost"), "New one")], &ids);
        assert_eq!(merged[0].id, "ghost");
        assert!(!merged[0].is_completed);
    }

    #[test]
    fn dropped_tasks_disappear() {
        let current = vec![existing("a", false), existing("b", false)];
        let ids = SequenceIdGenerator::new("new");

        let merged = reconcile(&current, vec![item(Some("b"), "Only one left")], &ids);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "b");
    }

    #[test]
    fn zero_minute_estimate_is_floored() {
        let ids = SequenceIdGenerator::new("new");
        let mut rewrite = item(None, "Instant");
        rewrite.estimated_minutes = 0;

        let merged = reconcile(&[], vec![rewrite], &ids);
        assert_eq!(merged[0].estimated_minutes, 1);
    }
}
