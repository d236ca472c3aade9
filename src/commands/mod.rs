//! Command dispatch and handlers.

pub mod quotes;
pub mod run;

use crate::cli::Command;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub async fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Run { offline } => run::run(*offline).await,
        Command::Quotes => quotes::run(),
    }
}
