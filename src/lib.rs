//! Core library for the `dayflow` CLI.
//!
//! A brain dump goes in; an ordered, time-estimated plan comes out; tasks
//! are executed one at a time in a countdown focus session. The only
//! external boundaries are the clock, the id generator, and the language
//! model, each behind a port trait in [`ports`] with live and scripted
//! adapters in [`adapters`].

pub mod adapters;
pub mod assistant;
pub mod cli;
pub mod commands;
pub mod context;
pub mod controller;
pub mod domain;
pub mod focus;
pub mod plan;
pub mod ports;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command
/// execution fails.
pub async fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command).await
}

#[cfg(test)]
mod tests {
    use super::run;

    #[tokio::test]
    async fn run_executes_quotes() {
        let result = run(["dayflow", "quotes"]).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn run_errors_on_unknown_subcommand() {
        let result = run(["dayflow", "unknown"]).await;
        assert!(result.is_err());
    }
}
