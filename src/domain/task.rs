//! Core task and micro-step types.

use serde::{Deserialize, Serialize};

/// Broad bucket a task belongs to.
///
/// The wire spelling (sent to and received from the model) is
/// SCREAMING_SNAKE_CASE, matching the schema the prompts describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Household chores and home upkeep.
    Home,
    /// Job or career work.
    Work,
    /// Physical and mental health.
    Health,
    /// Shopping, appointments, things that happen out of the house.
    Errands,
    /// Calls, messages, time with people.
    Social,
    /// Anything that fits nowhere else.
    Other,
}

impl Category {
    /// Parses a wire-format category, collapsing anything unrecognized to
    /// [`Category::Other`] so a sloppy model response never fails a plan.
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "HOME" => Self::Home,
            "WORK" => Self::Work,
            "HEALTH" => Self::Health,
            "ERRANDS" => Self::Errands,
            "SOCIAL" => Self::Social,
            _ => Self::Other,
        }
    }

    /// The wire-format name of this category.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Work => "WORK",
            Self::Health => "HEALTH",
            Self::Errands => "ERRANDS",
            Self::Social => "SOCIAL",
            Self::Other => "OTHER",
        }
    }

    /// Emoji shown next to tasks of this category.
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Home => "🏠",
            Self::Work => "💼",
            Self::Health => "🧘",
            Self::Errands => "🛒",
            Self::Social => "👋",
            Self::Other => "✨",
        }
    }
}

/// Three-point intensity scale, used for both required energy and priority.
///
/// Wire spelling is lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Demanding / urgent.
    High,
    /// Middling.
    Medium,
    /// Gentle / can wait.
    Low,
}

impl Level {
    /// Parses a wire-format level, collapsing anything unrecognized to
    /// [`Level::Medium`].
    #[must_use]
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "low" => Self::Low,
            _ => Self::Medium,
        }
    }

    /// The wire-format name of this level.
    #[must_use]
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// A tiny, non-threatening slice of a task, produced on demand when the
/// user asks for a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroStep {
    /// Unique identifier.
    pub id: String,
    /// What to do, phrased to be easy to start.
    pub title: String,
    /// Expected duration; always positive, under five minutes by contract.
    pub duration_minutes: u32,
    /// Whether the user has checked this step off. Steps complete in any
    /// order.
    pub is_completed: bool,
}

/// One structured item in the day plan.
///
/// The `id` is opaque and immutable once assigned; it is the sole key used
/// to recognize a task across an AI-driven plan rewrite. `is_completed`
/// and `is_skipped` are independent flags — nothing forbids both being
/// set, matching the behavior this tool grew up with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque unique identifier, stable across plan rewrites.
    pub id: String,
    /// Short non-empty title.
    pub title: String,
    /// Optional longer note.
    #[serde(default)]
    pub description: Option<String>,
    /// Which bucket this task falls into.
    pub category: Category,
    /// Positive minute estimate; manual edits floor at 1.
    pub estimated_minutes: u32,
    /// Energy the task demands of the user.
    pub energy_level: Level,
    /// How urgent the task is.
    pub priority: Level,
    /// Set when the user finishes the task.
    #[serde(default)]
    pub is_completed: bool,
    /// Set when the user skips the task.
    #[serde(default)]
    pub is_skipped: bool,
    /// Breakdown steps; empty until the user requests one in a focus
    /// session.
    #[serde(default)]
    pub micro_steps: Vec<MicroStep>,
}

impl Task {
    /// Creates a fresh, not-yet-touched task.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: Category,
        estimated_minutes: u32,
        energy_level: Level,
        priority: Level,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            category,
            estimated_minutes,
            energy_level,
            priority,
            is_completed: false,
            is_skipped: false,
            micro_steps: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_wire_round_trip() {
        for cat in [
            Category::Home,
            Category::Work,
            Category::Health,
            Category::Errands,
            Category::Social,
            Category::Other,
        ] {
            assert_eq!(Category::from_wire(cat.wire_name()), cat);
        }
    }

    #[test]
    fn unknown_category_collapses_to_other() {
        assert_eq!(Category::from_wire("CHORES"), Category::Other);
        assert_eq!(Category::from_wire(""), Category::Other);
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(Category::from_wire("home"), Category::Home);
        assert_eq!(Category::from_wire(" Work "), Category::Work);
    }

    #[test]
    fn unknown_level_collapses_to_medium() {
        assert_eq!(Level::from_wire("extreme"), Level::Medium);
        assert_eq!(Level::from_wire("HIGH"), Level::High);
    }

    #[test]
    fn category_serializes_screaming() {
        let json = serde_json::to_string(&Category::Errands).unwrap();
        assert_eq!(json, "\"ERRANDS\"");
    }

    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_string(&Level::High).unwrap();
        assert_eq!(json, "\"high\"");
    }

    #[test]
    fn new_task_starts_untouched() {
        let task = Task::new("t-1", "Water plants", Category::Home, 5, Level::Low, Level::Low);
        assert!(!task.is_completed);
        assert!(!task.is_skipped);
        assert!(task.description.is_none());
        assert!(task.micro_steps.is_empty());
    }
}
