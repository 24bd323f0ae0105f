use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "studyplan",
    version,
    about = "Study planner with a Pomodoro focus timer"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a 7-day study plan for the given subjects
    Plan {
        /// Subject and exam date as NAME@YYYY-MM-DD (repeatable)
        #[arg(long = "subject", short = 's', required = true)]
        subjects: Vec<String>,
        /// Study hours available per day (defaults to the config value)
        #[arg(long)]
        hours: Option<String>,
        /// Plan as of this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
        /// Also write the plan to this file
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
    /// Run one 25 minute focus session in the terminal
    Timer,
    /// Show the config file location and effective settings
    Config,
    /// Launch the interactive TUI
    Tui,
}
