use crate::config::Config;
use crate::plan::parse_hours;
use crate::session::Session;
use crate::storage::config_path;
use crate::timer::TimerEvent;
use crate::ui;
use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use std::io::{stdout, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn plan(
    config: &Config,
    subjects: Vec<String>,
    hours: Option<String>,
    today: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let today = match today {
        Some(raw) => parse_date(&raw)?,
        None => current_date(),
    };
    let daily_hours = match hours {
        Some(raw) => parse_hours(&raw)?,
        None => config
            .daily_hours
            .ok_or_else(|| anyhow!("pass --hours or set daily_hours in the config file"))?,
    };

    let mut session = Session::new();
    for raw in &subjects {
        let (name, date) = parse_subject_arg(raw)?;
        session
            .add_subject(name, date)
            .with_context(|| format!("adding subject {:?}", raw))?;
    }
    let plan = session.generate_plan(daily_hours, today)?;
    for name in &plan.excluded {
        eprintln!("skipped {} (due today or already past)", name);
    }
    print!("{}", session.output());
    if let Some(path) = out {
        session.save_output(&path)?;
        eprintln!("Saved plan to {}", path.display());
    }
    Ok(())
}

pub fn timer() -> Result<()> {
    let mut session = Session::new();
    session.start_timer();
    let mut out = stdout();
    loop {
        write!(out, "\rFocus {}", session.timer().display())?;
        out.flush()?;
        if !session.timer().is_running() {
            break;
        }
        thread::sleep(Duration::from_secs(1));
        if let Some(TimerEvent::Completed) = session.tick_timer() {
            write!(out, "\rFocus {}", session.timer().display())?;
            writeln!(out)?;
            println!("Pomodoro complete. Time for a break!");
            break;
        }
    }
    Ok(())
}

pub fn config(config: &Config) -> Result<()> {
    println!("# Config file: {}", config_path()?.display());
    print!("{}", config.effective().to_yaml()?);
    Ok(())
}

pub fn tui(config: Config) -> Result<()> {
    ui::run(Session::new(), config)
}

pub fn current_date() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| anyhow!("invalid date format (use YYYY-MM-DD): {}", trimmed))
}

/// Splits `NAME@YYYY-MM-DD` at the last `@`, so names may contain one.
fn parse_subject_arg(raw: &str) -> Result<(&str, NaiveDate)> {
    let (name, date) = raw
        .rsplit_once('@')
        .ok_or_else(|| anyhow!("expected NAME@YYYY-MM-DD, got {:?}", raw))?;
    Ok((name, parse_date(date)?))
}
