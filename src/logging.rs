use crate::storage::log_dir;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "STUDYPLAN_LOG";
const LOG_FILE: &str = "studyplan.log";

/// Sends `tracing` output to a file in the data dir; the terminal belongs to the UI.
///
/// `STUDYPLAN_LOG` takes precedence over `level`.
pub fn init(level: &str) -> Result<PathBuf> {
    let dir = log_dir()?;
    fs::create_dir_all(&dir).with_context(|| format!("creating {:?}", dir))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening {:?}", path))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("installing log subscriber: {}", err))?;
    Ok(path)
}
