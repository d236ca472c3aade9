//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `dayflow`.
#[derive(Debug, Parser)]
#[command(name = "dayflow", version, about = "Plan an overwhelming day one task at a time")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive planning session.
    Run {
        /// Skip the live model; every assistant call serves its offline
        /// fallback. Needs no network or API key.
        #[arg(long)]
        offline: bool,
    },
    /// Print the celebration encouragement lines.
    Quotes,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn parses_run_subcommand() {
        let cli = Cli::parse_from(["dayflow", "run"]);
        assert!(matches!(cli.command, Command::Run { offline: false }));
    }

    #[test]
    fn parses_run_offline_flag() {
        let cli = Cli::parse_from(["dayflow", "run", "--offline"]);
        assert!(matches!(cli.command, Command::Run { offline: true }));
    }

    #[test]
    fn parses_quotes_subcommand() {
        let cli = Cli::parse_from(["dayflow", "quotes"]);
        assert!(matches!(cli.command, Command::Quotes));
    }
}
