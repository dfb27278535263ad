//! CLI module - Command-line interface for ubgym
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

pub use commands::{cmd_init, cmd_leaderboard, cmd_migrate};

/// ubgym - workout tracking API
/// Routines, personal records, workout history and a strength leaderboard
#[derive(Parser)]
#[command(name = "ubgym")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "daemon")]
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Write a default config.toml if none exists
    Init,

    /// Print the current leaderboard
    #[command(alias = "lb")]
    Leaderboard {
        /// Rank by lifts relative to bodyweight instead of the raw total
        #[arg(long)]
        relative: bool,

        /// Column to sort the absolute board by (total, bench, squat, deadlift)
        #[arg(long, default_value = "total", conflicts_with = "relative")]
        sort: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_implied_without_subcommand() {
        let cli = Cli::try_parse_from(["ubgym"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn leaderboard_flags() {
        let cli = Cli::try_parse_from(["ubgym", "leaderboard", "--relative"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Leaderboard { relative: true, .. })
        ));

        let cli = Cli::try_parse_from(["ubgym", "lb", "--sort", "squat"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Leaderboard {
                relative: false,
                sort: "squat".to_string()
            })
        );
    }

    #[test]
    fn relative_and_sort_conflict() {
        assert!(Cli::try_parse_from(["ubgym", "leaderboard", "--relative", "--sort", "bench"]).is_err());
    }
}
