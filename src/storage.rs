use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_EXPORT_FILE: &str = "study_plan.txt";

/// Writes the rendered plan verbatim. An empty `text` produces an empty file.
pub fn export_plan(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
        }
    }
    fs::write(path, text).with_context(|| format!("writing {:?}", path))?;
    Ok(())
}

pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.yml"))
}

pub fn log_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "studyplan").context("locating data directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_writes_text_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.txt");
        export_plan(&path, "Smart Study Plan:\n\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Smart Study Plan:\n\n");
    }

    #[test]
    fn export_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/plan.txt");
        export_plan(&path, "x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn export_of_empty_text_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        export_plan(&path, "").unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    }
}
