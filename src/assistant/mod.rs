//! The assistant gateway: the only boundary to the language model.
//!
//! Each public operation is total — it resolves to a useful value no
//! matter what the model or the network does. Internally every operation
//! has a fallible `try_*` twin; the public wrapper logs the failure and
//! collapses it into a deterministic, locally-defined fallback. Retry or
//! backoff logic, if ever wanted, belongs in the `try_*` layer and
//! changes nothing for callers.

mod error;
mod parse;
mod prompts;

use log::{debug, warn};

pub use error::AssistError;

use crate::context::ServiceContext;
use crate::domain::{Category, Level, MicroStep, Task};
use crate::plan::reconcile;
use crate::ports::llm::CompletionRequest;

/// Emotion tag sent with every stuck-coaching request.
pub const STUCK_EMOTION: &str = "overwhelmed";

/// Placeholder coaching text shown while a real answer is on its way.
pub const COACHING_PENDING: &str = "Thinking...";

const ORGANIZE_MAX_TOKENS: u32 = 2048;
const REFINE_MAX_TOKENS: u32 = 2048;
const BREAKDOWN_MAX_TOKENS: u32 = 512;
const COACH_MAX_TOKENS: u32 = 256;

/// A structured plan plus the assistant's message about it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizedPlan {
    /// Ordered tasks, first to do first.
    pub tasks: Vec<Task>,
    /// Encouragement or a summary of what changed.
    pub message: String,
}

/// Structures a raw brain dump into an ordered, estimated task list.
///
/// Never fails: any model or transport problem yields a single gentle
/// grounding task and an apologetic message instead.
pub async fn organize(ctx: &ServiceContext, raw_text: &str, energy: Level) -> OrganizedPlan {
    match try_organize(ctx, raw_text, energy).await {
        Ok(plan) => {
            debug!("organize: structured {} tasks", plan.tasks.len());
            plan
        }
        Err(err) => {
            warn!("organize fell back: {err}");
            fallback_plan(ctx)
        }
    }
}

async fn try_organize(
    ctx: &ServiceContext,
    raw_text: &str,
    energy: Level,
) -> Result<OrganizedPlan, AssistError> {
    let request = CompletionRequest {
        prompt: prompts::organize_prompt(raw_text, energy),
        response_schema: Some(prompts::organize_schema()),
        max_tokens: ORGANIZE_MAX_TOKENS,
    };
    let response =
        ctx.llm.complete(&request).await.map_err(|e| AssistError::Request(e.to_string()))?;

    let (parsed, message) = parse::parse_plan(&response.text)?;
    let tasks = parsed
        .into_iter()
        .map(|t| {
            let mut task = Task::new(
                ctx.id_gen.generate_id(),
                t.title,
                t.category,
                t.estimated_minutes,
                t.energy_level,
                t.priority,
            );
            task.description = t.description;
            task
        })
        .collect();

    Ok(OrganizedPlan { tasks, message })
}

/// Revises the plan from free-form feedback, then reconciles the result
/// so completion flags, descriptions, and micro-steps survive the
/// rewrite.
///
/// Never fails: on any problem the current list comes back unmodified
/// with a message owning up to it.
pub async fn refine(ctx: &ServiceContext, current: &[Task], feedback: &str) -> OrganizedPlan {
    match try_refine(ctx, current, feedback).await {
        Ok(plan) => {
            debug!("refine: plan now has {} tasks", plan.tasks.len());
            plan
        }
        Err(err) => {
            warn!("refine fell back: {err}");
            OrganizedPlan {
                tasks: current.to_vec(),
                message: "I couldn't update the plan just now. Try manual editing?".to_string(),
            }
        }
    }
}

async fn try_refine(
    ctx: &ServiceContext,
    current: &[Task],
    feedback: &str,
) -> Result<OrganizedPlan, AssistError> {
    let request = CompletionRequest {
        prompt: prompts::refine_prompt(current, feedback),
        response_schema: Some(prompts::refine_schema()),
        max_tokens: REFINE_MAX_TOKENS,
    };
    let response =
        ctx.llm.complete(&request).await.map_err(|e| AssistError::Request(e.to_string()))?;

    let (items, message) = parse::parse_rewrite(&response.text)?;
    let tasks = reconcile(current, items, ctx.id_gen.as_ref());

    Ok(OrganizedPlan { tasks, message })
}

/// Breaks a task into 3–5 tiny steps, each under five minutes.
///
/// Never fails: any problem yields the fixed two-step "just start"
/// sequence.
pub async fn break_down(ctx: &ServiceContext, task_title: &str) -> Vec<MicroStep> {
    match try_break_down(ctx, task_title).await {
        Ok(steps) => {
            debug!("break_down: {} steps for {task_title:?}", steps.len());
            steps
        }
        Err(err) => {
            warn!("break_down fell back: {err}");
            fallback_steps(ctx)
        }
    }
}

async fn try_break_down(
    ctx: &ServiceContext,
    task_title: &str,
) -> Result<Vec<MicroStep>, AssistError> {
    let request = CompletionRequest {
        prompt: prompts::breakdown_prompt(task_title),
        response_schema: Some(prompts::breakdown_schema()),
        max_tokens: BREAKDOWN_MAX_TOKENS,
    };
    let response =
        ctx.llm.complete(&request).await.map_err(|e| AssistError::Request(e.to_string()))?;

    let steps = parse::parse_steps(&response.text)?
        .into_iter()
        .map(|step| MicroStep {
            id: ctx.id_gen.generate_id(),
            title: step.title,
            duration_minutes: step.duration_minutes,
            is_completed: false,
        })
        .collect();

    Ok(steps)
}

/// One short compassionate paragraph about starting, not finishing.
///
/// Never fails. The two fallback lines differ on purpose: a blank
/// response earns a different nudge than a dead connection.
pub async fn coach(ctx: &ServiceContext, task_title: &str, emotion: &str) -> String {
    let request = CompletionRequest {
        prompt: prompts::coach_prompt(task_title, emotion),
        response_schema: None,
        max_tokens: COACH_MAX_TOKENS,
    };

    match ctx.llm.complete(&request).await {
        Ok(response) => match parse::parse_coaching(&response.text) {
            Ok(text) => text,
            Err(err) => {
                warn!("coach got a blank response: {err}");
                "You've got this. Just one small step.".to_string()
            }
        },
        Err(err) => {
            warn!("coach fell back: {err}");
            "Take a deep breath. Just 10 seconds of action counts.".to_string()
        }
    }
}

/// The single grounding task served when organize cannot reach the model.
fn fallback_plan(ctx: &ServiceContext) -> OrganizedPlan {
    let mut task = Task::new(
        ctx.id_gen.generate_id(),
        "Take a deep breath",
        Category::Health,
        2,
        Level::Low,
        Level::High,
    );
    task.description = Some("Let's just center ourselves before starting.".to_string());

    OrganizedPlan {
        tasks: vec![task],
        message: "I had a little trouble connecting, but let's start with something simple."
            .to_string(),
    }
}

/// The fixed step pair served when a breakdown cannot reach the model.
fn fallback_steps(ctx: &ServiceContext) -> Vec<MicroStep> {
    [("Just do 1 minute of it", 1), ("See how you feel", 1)]
        .into_iter()
        .map(|(title, duration_minutes)| MicroStep {
            id: ctx.id_gen.generate_id(),
            title: title.to_string(),
            duration_minutes,
            is_completed: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scripted::{ManualClock, ScriptedLlmClient, SequenceIdGenerator};
    use crate::context::ServiceContext;

    fn scripted_ctx(llm: ScriptedLlmClient) -> ServiceContext {
        ServiceContext::new(
            Box::new(ManualClock::new()),
            Box::new(SequenceIdGenerator::new("t")),
            Box::new(llm),
        )
    }

    #[tokio::test]
    async fn organize_assigns_fresh_ids_and_clean_flags() {
        let llm = ScriptedLlmClient::with_script(vec![Ok(r#"{
            "tasks": [
                { "title": "Shower", "category": "HEALTH", "estimatedMinutes": 15,
                  "energyLevel": "low", "priority": "medium" },
                { "title": "Write report", "category": "WORK", "estimatedMinutes": 45,
                  "energyLevel": "high", "priority": "high" }
            ],
            "message": "Easy start, then the big one."
        }"#
        .into())]);
        let ctx = scripted_ctx(llm);

        let plan = organize(&ctx, "shower, write report", Level::Medium).await;

        assert_eq!(plan.message, "Easy start, then the big one.");
        assert_eq!(plan.tasks.len(), 2);
        assert_eq!(plan.tasks[0].id, "t-1");
        assert_eq!(plan.tasks[1].id, "t-2");
        assert!(plan.tasks.iter().all(|t| !t.is_completed && !t.is_skipped));
        assert_eq!(plan.tasks[1].category, Category::Work);
    }

    #[tokio::test]
    async fn organize_falls_back_to_one_grounding_task() {
        let ctx = scripted_ctx(ScriptedLlmClient::failing());

        let plan = organize(&ctx, "clean room", Level::Medium).await;

        assert_eq!(plan.tasks.len(), 1);
        let task = &plan.tasks[0];
        assert_eq!(task.title, "Take a deep breath");
        assert_eq!(task.category, Category::Health);
        assert!((1..=5).contains(&task.estimated_minutes));
        assert!(!task.is_completed);
        assert!(plan.message.contains("trouble connecting"));
    }

    #[tokio::test]
    async fn organize_falls_back_on_malformed_json() {
        let llm = ScriptedLlmClient::with_script(vec![Ok("I refuse to answer in JSON".into())]);
        let ctx = scripted_ctx(llm);

        let plan = organize(&ctx, "clean room", Level::High).await;
        assert_eq!(plan.tasks.len(), 1);
        assert_eq!(plan.tasks[0].title, "Take a deep breath");
    }

    #[tokio::test]
    async fn refine_preserves_local_flags_in_remote_order() {
        let mut a = Task::new("a", "First", Category::Work, 30, Level::Medium, Level::Medium);
        a.is_completed = true;
        let b = Task::new("b", "Second", Category::Home, 20, Level::Low, Level::Low);

        let llm = ScriptedLlmClient::with_script(vec![Ok(r#"{
            "tasks": [
                { "id": "b", "title": "X", "estimatedMinutes": 20 },
                { "id": "a", "title": "Y", "estimatedMinutes": 30 }
            ],
            "message": "Swapped them."
        }"#
        .into())]);
        let ctx = scripted_ctx(llm);

        let plan = refine(&ctx, &[a, b], "do the home thing first").await;

        assert_eq!(plan.tasks[0].id, "b");
        assert!(!plan.tasks[0].is_completed);
        assert_eq!(plan.tasks[1].id, "a");
        assert!(plan.tasks[1].is_completed);
        assert_eq!(plan.message, "Swapped them.");
    }

    #[tokio::test]
    async fn refine_failure_returns_input_unchanged() {
        let tasks =
            vec![Task::new("a", "Only task", Category::Other, 10, Level::Medium, Level::Medium)];
        let ctx = scripted_ctx(ScriptedLlmClient::failing());

        let plan = refine(&ctx, &tasks, "please help").await;

        assert_eq!(plan.tasks, tasks);
        assert!(plan.message.contains("manual editing"));
    }

    #[tokio::test]
    async fn break_down_assigns_fresh_step_ids() {
        let llm = ScriptedLlmClient::with_script(vec![Ok(r#"{
            "steps": [
                { "title": "Stand up", "durationMinutes": 1 },
                { "title": "Open the laptop", "durationMinutes": 2 },
                { "title": "Write one line", "durationMinutes": 4 }
            ]
        }"#
        .into())]);
        let ctx = scripted_ctx(llm);

        let steps = break_down(&ctx, "Write report").await;

        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].id, "t-1");
        assert!(steps.iter().all(|s| !s.is_completed));
    }

    #[tokio::test]
    async fn break_down_falls_back_to_fixed_pair() {
        let ctx = scripted_ctx(ScriptedLlmClient::failing());

        let steps = break_down(&ctx, "Write report").await;

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].title, "Just do 1 minute of it");
        assert_eq!(steps[1].title, "See how you feel");
        assert!(steps.iter().all(|s| s.duration_minutes == 1));
    }

    #[tokio::test]
    async fn coach_returns_model_text() {
        let llm = ScriptedLlmClient::with_script(vec![Ok("Start with ten seconds.".into())]);
        let ctx = scripted_ctx(llm);

        let text = coach(&ctx, "Do taxes", STUCK_EMOTION).await;
        assert_eq!(text, "Start with ten seconds.");
    }

    #[tokio::test]
    async fn coach_distinguishes_blank_from_broken() {
        let blank = scripted_ctx(ScriptedLlmClient::with_script(vec![Ok("   ".into())]));
        assert_eq!(
            coach(&blank, "Do taxes", STUCK_EMOTION).await,
            "You've got this. Just one small step."
        );

        let broken = scripted_ctx(ScriptedLlmClient::failing());
        assert_eq!(
            coach(&broken, "Do taxes", STUCK_EMOTION).await,
            "Take a deep breath. Just 10 seconds of action counts."
        );
    }
}
