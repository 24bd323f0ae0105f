mod cli;
mod commands;
mod config;
mod logging;
mod model;
mod plan;
mod session;
mod storage;
mod timer;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let config = config::Config::load()?;
    if let Err(err) = logging::init(config.log_level()) {
        eprintln!("warning: logging disabled: {:#}", err);
    }
    let command = args.command.unwrap_or(cli::Command::Tui);
    match command {
        cli::Command::Plan {
            subjects,
            hours,
            today,
            out,
        } => commands::plan(&config, subjects, hours, today, out),
        cli::Command::Timer => commands::timer(),
        cli::Command::Config => commands::config(&config),
        cli::Command::Tui => commands::tui(config),
    }
}
