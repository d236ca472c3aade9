//! Response parsing and validation for assistant operations.
//!
//! Models are asked for bare JSON, but a stray markdown fence or a
//! slightly-off enumeration spelling should degrade a single field, not
//! the whole plan. Anything that cannot be salvaged becomes an
//! [`AssistError`] and the caller falls back.

use serde::Deserialize;

use super::error::AssistError;
use crate::domain::{Category, Level};
use crate::plan::RewriteItem;

/// One organized task, validated but not yet given an id.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedTask {
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub estimated_minutes: u32,
    pub energy_level: Level,
    pub priority: Level,
}

/// One micro-step, validated but not yet given an id.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedStep {
    pub title: String,
    pub duration_minutes: u32,
}

#[derive(Deserialize)]
struct PlanPayload {
    #[serde(default)]
    tasks: Vec<TaskPayload>,
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskPayload {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    estimated_minutes: f64,
    #[serde(default)]
    energy_level: Option<String>,
    #[serde(default)]
    priority: Option<String>,
}

#[derive(Deserialize)]
struct StepsPayload {
    #[serde(default)]
    steps: Vec<StepPayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StepPayload {
    #[serde(default)]
    title: String,
    #[serde(default)]
    duration_minutes: f64,
}

/// Parses an organize response into tasks plus the encouragement message.
pub(crate) fn parse_plan(text: &str) -> Result<(Vec<ParsedTask>, String), AssistError> {
    let payload: PlanPayload = serde_json::from_str(strip_fences(text))?;
    let tasks: Vec<ParsedTask> = payload
        .tasks
        .into_iter()
        .filter(|task| !task.title.trim().is_empty())
        .map(|task| ParsedTask {
            title: task.title.trim().to_string(),
            description: task.description.filter(|d| !d.trim().is_empty()),
            category: task.category.as_deref().map(Category::from_wire).unwrap_or(Category::Other),
            estimated_minutes: minutes(task.estimated_minutes),
            energy_level: level_or_medium(task.energy_level.as_deref()),
            priority: level_or_medium(task.priority.as_deref()),
        })
        .collect();

    if tasks.is_empty() {
        return Err(AssistError::Empty);
    }
    Ok((tasks, payload.message))
}

/// Parses a refine response into rewrite items plus the change summary.
pub(crate) fn parse_rewrite(text: &str) -> Result<(Vec<RewriteItem>, String), AssistError> {
    let payload: PlanPayload = serde_json::from_str(strip_fences(text))?;
    let items: Vec<RewriteItem> = payload
        .tasks
        .into_iter()
        .filter(|task| !task.title.trim().is_empty())
        .map(|task| RewriteItem {
            id: task.id.filter(|id| !id.trim().is_empty()),
            title: task.title.trim().to_string(),
            category: task.category.as_deref().map(Category::from_wire).unwrap_or(Category::Other),
            estimated_minutes: minutes(task.estimated_minutes),
            energy_level: level_or_medium(task.energy_level.as_deref()),
            priority: level_or_medium(task.priority.as_deref()),
        })
        .collect();

    if items.is_empty() {
        return Err(AssistError::Empty);
    }
    Ok((items, payload.message))
}

/// Parses a breakdown response into validated micro-steps.
pub(crate) fn parse_steps(text: &str) -> Result<Vec<ParsedStep>, AssistError> {
    let payload: StepsPayload = serde_json::from_str(strip_fences(text))?;
    let steps: Vec<ParsedStep> = payload
        .steps
        .into_iter()
        .filter(|step| !step.title.trim().is_empty())
        .map(|step| ParsedStep {
            title: step.title.trim().to_string(),
            duration_minutes: minutes(step.duration_minutes),
        })
        .collect();

    if steps.is_empty() {
        return Err(AssistError::Empty);
    }
    Ok(steps)
}

/// Parses a coaching response: plain text, must be non-blank.
pub(crate) fn parse_coaching(text: &str) -> Result<String, AssistError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(AssistError::Empty);
    }
    Ok(trimmed.to_string())
}

/// Strips a surrounding markdown code fence, if the model added one
/// despite instructions.
fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches(['\r', '\n']).trim_end().trim_end_matches("```").trim()
}

/// Rounds a wire minute count to a positive whole number.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn minutes(raw: f64) -> u32 {
    if raw.is_finite() && raw >= 1.0 {
        raw.round().min(f64::from(u32::MAX)) as u32
    } else {
        1
    }
}

fn level_or_medium(raw: Option<&str>) -> Level {
    raw.map(Level::from_wire).unwrap_or(Level::Medium)
}
