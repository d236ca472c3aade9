//! Prompt and response-schema builders for the assistant operations.

use std::fmt::Write as _;

use serde_json::{json, Value};

use crate::domain::{Level, Task};

/// Prompt for structuring a raw brain dump into an ordered plan.
pub(crate) fn organize_prompt(raw_text: &str, energy: Level) -> String {
    format!(
        "The user feels overwhelmed. They have dumped the following list of things to do:\n\
         \"{raw_text}\"\n\n\
         The user's current energy level is: {}.\n\n\
         Please organize this list into structured tasks.\n\
         Rules:\n\
         1. Estimate time (in minutes) for each. Be realistic (e.g., a shower is 15 mins, \
         not 60; writing a report is 45 mins, not 5).\n\
         2. Assign a category (HOME, WORK, HEALTH, ERRANDS, SOCIAL, OTHER).\n\
         3. Check for LOGICAL DEPENDENCIES. (e.g., \"Buy groceries\" must happen before \
         \"Cook dinner\". \"Get dressed\" before \"Go out\").\n\
         4. Sort them logically. Usually, quick wins first build momentum, but respect \
         dependencies.\n\
         5. Assign an energy level required (high, medium, low) and a priority.\n\
         6. Provide a short, encouraging 1-sentence message.",
        energy.wire_name()
    )
}

/// Response schema for [`organize_prompt`].
pub(crate) fn organize_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "tasks": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "category": {
                            "type": "string",
                            "enum": ["HOME", "WORK", "HEALTH", "ERRANDS", "SOCIAL", "OTHER"]
                        },
                        "estimatedMinutes": { "type": "number" },
                        "energyLevel": { "type": "string", "enum": ["high", "medium", "low"] },
                        "priority": { "type": "string", "enum": ["high", "medium", "low"] }
                    },
                    "required": ["title", "category", "estimatedMinutes", "energyLevel"]
                }
            },
            "message": { "type": "string" }
        },
        "required": ["tasks", "message"]
    })
}

/// Prompt for revising an existing plan from free-form feedback.
///
/// Only the projection the model is allowed to see — id, title, duration,
/// category — is serialized in; completion flags, descriptions, and
/// micro-steps stay local.
pub(crate) fn refine_prompt(tasks: &[Task], feedback: &str) -> String {
    let projection: Vec<Value> = tasks
        .iter()
        .map(|task| {
            json!({
                "id": task.id,
                "title": task.title,
                "duration": task.estimated_minutes,
                "category": task.category,
            })
        })
        .collect();

    let mut prompt = String::from("You are a personal organizer.\n");
    let _ = writeln!(prompt, "Current Plan (JSON): {}", Value::Array(projection));
    let _ = writeln!(prompt, "\nUser Feedback/Complaint: \"{feedback}\"");
    prompt.push_str(
        "\nPlease modify the plan to address the user's feedback.\n\
         - If they want to reorder, change the order.\n\
         - If they disagree with times, update estimatedMinutes.\n\
         - If they want to group things differently, do that.\n\
         - Keep the IDs the same for existing tasks.\n\
         - You can add new tasks if the feedback implies it.\n\
         - Return the full updated list.",
    );
    prompt
}

/// Response schema for [`refine_prompt`].
pub(crate) fn refine_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "tasks": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": {
                            "type": "string",
                            "description": "Reuse the existing id; omit for new tasks"
                        },
                        "title": { "type": "string" },
                        "category": {
                            "type": "string",
                            "enum": ["HOME", "WORK", "HEALTH", "ERRANDS", "SOCIAL", "OTHER"]
                        },
                        "estimatedMinutes": { "type": "number" },
                        "energyLevel": { "type": "string", "enum": ["high", "medium", "low"] },
                        "priority": { "type": "string", "enum": ["high", "medium", "low"] }
                    },
                    "required": ["title", "estimatedMinutes"]
                }
            },
            "message": {
                "type": "string",
                "description": "A brief confirmation of what changed"
            }
        },
        "required": ["tasks", "message"]
    })
}

/// Prompt for breaking a task into micro-steps.
pub(crate) fn breakdown_prompt(task_title: &str) -> String {
    format!(
        "The user is procrastinating on this task: \"{task_title}\".\n\
         Break it down into 3-5 incredibly small, non-threatening micro-steps.\n\
         Each step should take less than 5 minutes.\n\
         The first step should be laughably easy (e.g., \"Stand up\", \"Open the laptop\")."
    )
}

/// Response schema for [`breakdown_prompt`].
pub(crate) fn breakdown_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "steps": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "durationMinutes": { "type": "number" }
                    },
                    "required": ["title", "durationMinutes"]
                }
            }
        },
        "required": ["steps"]
    })
}

/// Prompt for a short pep talk when the user is stuck.
pub(crate) fn coach_prompt(task_title: &str, emotion: &str) -> String {
    format!(
        "User is stuck on \"{task_title}\" and feels \"{emotion}\".\n\
         Act as a compassionate, non-judgmental life coach.\n\
         Give one short paragraph (2-3 sentences) of advice to help them move just one \
         inch forward.\n\
         Focus on \"starting\" not \"finishing\"."
    )
}
