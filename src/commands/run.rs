//! `dayflow run` — the interactive planning session.
//!
//! A line-oriented front end over the session controller. Rendering here
//! is deliberately plain; every state change goes through the controller,
//! and the countdown is re-read from the wall clock on every render, so
//! the pace of user input never distorts the timer.

use std::env;
use std::io::{self, BufRead, Write};
use std::thread;

use crate::context::ServiceContext;
use crate::controller::{SessionController, View};
use crate::domain::{Level, Task, UserState};
use crate::focus::{FocusSession, TimerState};
use crate::plan::Direction;

/// Run the interactive session until the user quits.
///
/// # Errors
///
/// Returns an error string if reading from stdin fails.
pub async fn run(offline: bool) -> Result<(), String> {
    let ctx = if offline { ServiceContext::offline() } else { ServiceContext::live() };
    let mut controller = SessionController::new(ctx, user_from_env());

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        match controller.view() {
            View::Dashboard => {
                render_dashboard(&controller);
                let Some(line) = prompt(&mut input)? else { break };
                if !handle_dashboard(&mut controller, &line) {
                    break;
                }
            }
            View::BrainDump => {
                println!();
                println!("🧠 Unload your mind. Everything you need to do, in one line:");
                let Some(line) = prompt(&mut input)? else { break };
                if is_quit(&line) {
                    break;
                }
                if line.trim().is_empty() {
                    println!("(nothing yet — just type whatever is on your mind)");
                    continue;
                }
                println!("Organizing...");
                controller.submit_brain_dump(&line).await;
            }
            View::PlanReview => {
                render_plan(&controller);
                let Some(line) = prompt(&mut input)? else { break };
                if !handle_plan(&mut controller, &line).await {
                    break;
                }
            }
            View::Focus => {
                controller.tick();
                render_focus(&controller);
                let Some(line) = prompt(&mut input)? else { break };
                if !handle_focus(&mut controller, &line).await {
                    break;
                }
            }
            View::Celebration => {
                println!();
                println!("🏆 Task complete!");
                println!("   {}", controller.celebration_quote());
                thread::sleep(controller.celebration_dwell());
                controller.finish_celebration();
            }
        }
    }

    println!("See you next time.");
    Ok(())
}

fn user_from_env() -> UserState {
    let name = env::var("DAYFLOW_NAME").unwrap_or_else(|_| "Friend".to_string());
    let streak = env::var("DAYFLOW_STREAK").ok().and_then(|s| s.parse().ok()).unwrap_or(0);
    UserState::new(name, streak)
}

/// Prints the prompt and reads one line; `None` means end of input.
fn prompt(input: &mut impl BufRead) -> Result<Option<String>, String> {
    print!("> ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(|e| e.to_string())?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end().to_string()))
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "quit" | "q" | "exit")
}

// --- Dashboard ---

fn render_dashboard(controller: &SessionController) {
    let user = controller.user();
    println!();
    println!("── Good morning, {} ──", user.name);
    println!("   🔥 {}-day streak   ✅ {} completed today", user.streak, user.tasks_completed_today);
    println!("   energy: {}", user.energy.wire_name());
    println!("   [energy <high|medium|low> · plan · quit]");
}

fn handle_dashboard(controller: &mut SessionController, line: &str) -> bool {
    let mut words = line.trim().split_whitespace();
    match words.next() {
        Some("energy") => match words.next() {
            Some(level) => controller.set_energy(Level::from_wire(level)),
            None => println!("usage: energy <high|medium|low>"),
        },
        Some("plan") => controller.start_brain_dump(),
        Some(other) if is_quit(other) => return false,
        Some(other) => println!("unknown command: {other}"),
        None => {}
    }
    true
}

// --- Plan review ---

fn render_plan(controller: &SessionController) {
    println!();
    if !controller.message().is_empty() {
        println!("🤖 {}", controller.message());
    }
    let total = controller.total_minutes();
    println!("Your roadmap (total ~{}):", format_minutes(total));
    if controller.tasks().is_empty() {
        println!("   (no tasks left)");
    }
    for (i, task) in controller.tasks().iter().enumerate() {
        println!("   {}. {}", i + 1, describe_task(task));
    }
    println!("   [up/down <n> · longer/shorter <n> · delete <n> · fix <feedback> · start · quit]");
}

fn describe_task(task: &Task) -> String {
    let mark = if task.is_completed {
        " ✓"
    } else if task.is_skipped {
        " (skipped)"
    } else {
        ""
    };
    format!(
        "{} {} — {} min [{}]{mark}",
        task.category.emoji(),
        task.title,
        task.estimated_minutes,
        task.category.wire_name()
    )
}

async fn handle_plan(controller: &mut SessionController, line: &str) -> bool {
    let trimmed = line.trim();
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match word {
        "up" | "down" => {
            let direction = if word == "up" { Direction::Up } else { Direction::Down };
            match parse_index(rest, controller.tasks().len()) {
                Some(index) => controller.move_task(index, direction),
                None => println!("usage: {word} <task number>"),
            }
        }
        "longer" | "shorter" => {
            let delta = if word == "longer" { 5 } else { -5 };
            match task_id_at(controller, rest) {
                Some(id) => controller.adjust_time(&id, delta),
                None => println!("usage: {word} <task number>"),
            }
        }
        "delete" => match task_id_at(controller, rest) {
            Some(id) => controller.delete_task(&id),
            None => println!("usage: delete <task number>"),
        },
        "fix" => {
            if rest.is_empty() {
                println!("usage: fix <tell the assistant what to change>");
            } else {
                println!("Updating plan...");
                controller.refine_plan(rest).await;
            }
        }
        "start" => controller.start_day(),
        other if is_quit(other) => return false,
        "" => {}
        other => println!("unknown command: {other}"),
    }
    true
}

fn parse_index(raw: &str, len: usize) -> Option<usize> {
    let n: usize = raw.parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

fn task_id_at(controller: &SessionController, raw: &str) -> Option<String> {
    let index = parse_index(raw, controller.tasks().len())?;
    Some(controller.tasks()[index].id.clone())
}

// --- Focus ---

fn render_focus(controller: &SessionController) {
    let Some(focus) = controller.focus() else { return };
    println!();
    println!("Focus: {}", focus.task_title());
    let state = match focus.state() {
        TimerState::Running => "counting",
        TimerState::Idle => "paused",
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = (focus.progress() * 100.0).round() as u32;
    println!("   ⏳ {} · {state} · {percent}% done", format_clock(focus.remaining_seconds()));

    render_steps(focus);
    if let Some(coaching) = focus.coaching() {
        println!("   🧡 Coach: {coaching}");
    }
    if focus.help_open() {
        println!("   Stuck? try: steps (break it down) · stuck (pep talk) · minute (just 1 minute)");
    }
    println!("   [go · pause · minute · steps · check <n> · stuck · help · done · skip · back · quit]");
}

fn render_steps(focus: &FocusSession) {
    if focus.micro_steps().is_empty() {
        return;
    }
    println!("   Micro-steps:");
    for (i, step) in focus.micro_steps().iter().enumerate() {
        let mark = if step.is_completed { "x" } else { " " };
        println!("     [{mark}] {}. {} ({} min)", i + 1, step.title, step.duration_minutes);
    }
    if focus.all_steps_done() {
        println!("   All micro-steps done — type `done` to complete the task!");
    }
}

async fn handle_focus(controller: &mut SessionController, line: &str) -> bool {
    let trimmed = line.trim();
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    match word {
        "go" => controller.start_timer(),
        "pause" => controller.pause_timer(),
        "minute" => controller.quick_restart(),
        "steps" => {
            println!("Breaking it down...");
            controller.request_breakdown().await;
        }
        "check" => {
            let step_id = controller.focus().and_then(|focus| {
                let index = parse_index(rest, focus.micro_steps().len())?;
                Some(focus.micro_steps()[index].id.clone())
            });
            match step_id {
                Some(id) => controller.toggle_micro_step(&id),
                None => println!("usage: check <step number>"),
            }
        }
        "stuck" => {
            println!("Asking the coach...");
            controller.request_coaching().await;
        }
        "help" => controller.toggle_help(),
        "done" => {
            if let Some(id) = controller.focus().map(|f| f.task_id().to_string()) {
                controller.complete(&id);
            }
        }
        "skip" => {
            if let Some(id) = controller.focus().map(|f| f.task_id().to_string()) {
                controller.skip(&id);
            }
        }
        "back" => controller.back_to_plan(),
        other if is_quit(other) => return false,
        "" => {}
        other => println!("unknown command: {other}"),
    }
    true
}

// --- Formatting ---

fn format_minutes(total: u64) -> String {
    format!("{}h {}m", total / 60, total % 60)
}

fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    #[test]
    fn format_minutes_splits_hours() {
        assert_eq!(format_minutes(0), "0h 0m");
        assert_eq!(format_minutes(65), "1h 5m");
        assert_eq!(format_minutes(120), "2h 0m");
    }

    #[test]
    fn format_clock_pads_seconds() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(61), "1:01");
        assert_eq!(format_clock(15 * 60), "15:00");
    }

    #[test]
    fn parse_index_is_one_based_and_bounded() {
        assert_eq!(parse_index("1", 3), Some(0));
        assert_eq!(parse_index("3", 3), Some(2));
        assert_eq!(parse_index("4", 3), None);
        assert_eq!(parse_index("0", 3), None);
        assert_eq!(parse_index("x", 3), None);
    }

    #[test]
    fn describe_task_marks_completion() {
        let mut task = Task::new("a", "Shower", Category::Health, 15, Level::Low, Level::Low);
        assert_eq!(describe_task(&task), "🧘 Shower — 15 min [HEALTH]");
        task.is_completed = true;
        assert!(describe_task(&task).ends_with(" ✓"));
    }

    #[test]
    fn quit_aliases() {
        assert!(is_quit("quit"));
        assert!(is_quit("q"));
        assert!(is_quit(" exit "));
        assert!(!is_quit("done"));
    }
}
