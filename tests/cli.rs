use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn studyplan(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("studyplan").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("XDG_DATA_HOME", home.path().join("data"))
        .env("STUDYPLAN_LOG", "off");
    cmd
}

#[test]
fn plan_prints_seven_days_of_static_allocation() {
    let home = TempDir::new().unwrap();
    studyplan(&home)
        .args([
            "plan",
            "--today",
            "2026-10-19",
            "--hours",
            "5",
            "-s",
            "B@2026-10-27",
            "-s",
            "A@2026-10-21",
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Smart Study Plan:\n\n2026-10-19\n  - A: 1.0 hours\n  - B: 4.0 hours\n\n",
        ))
        .stdout(predicate::str::contains("2026-10-25\n  - A: 1.0 hours\n  - B: 4.0 hours\n"));
}

#[test]
fn plan_reports_skipped_subjects_on_stderr() {
    let home = TempDir::new().unwrap();
    studyplan(&home)
        .args([
            "plan",
            "--today",
            "2026-10-19",
            "--hours",
            "2",
            "-s",
            "Old@2026-10-10",
            "-s",
            "Next@2026-10-23",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("  - Next: 2.0 hours"))
        .stdout(predicate::str::contains("Old").not())
        .stderr(predicate::str::contains("skipped Old"));
}

#[test]
fn plan_with_only_past_subjects_fails_cleanly() {
    let home = TempDir::new().unwrap();
    studyplan(&home)
        .args([
            "plan",
            "--today",
            "2026-10-19",
            "--hours",
            "2",
            "-s",
            "Today@2026-10-19",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("due today or already past"));
}

#[test]
fn plan_rejects_invalid_hours() {
    let home = TempDir::new().unwrap();
    studyplan(&home)
        .args(["plan", "--hours=-3", "-s", "Math@2030-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("daily study hours"));
}

#[test]
fn plan_without_hours_uses_config_value() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("config/studyplan");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.yml"), "daily_hours: 3\n").unwrap();
    studyplan(&home)
        .args(["plan", "--today", "2026-10-19", "-s", "Math@2026-10-29"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  - Math: 3.0 hours"));
}

#[test]
fn plan_without_hours_or_config_fails() {
    let home = TempDir::new().unwrap();
    studyplan(&home)
        .args(["plan", "-s", "Math@2030-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--hours"));
}

#[test]
fn plan_out_writes_same_text_as_stdout() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("exports/week.txt");
    let assert = studyplan(&home)
        .args([
            "plan",
            "--today",
            "2026-10-19",
            "--hours",
            "4",
            "-s",
            "Chem@2026-10-20",
            "-o",
        ])
        .arg(&out)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(fs::read_to_string(&out).unwrap(), stdout);
}

#[test]
fn config_prints_effective_settings_as_yaml() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("config/studyplan");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.yml"), "log_level: debug\n").unwrap();
    studyplan(&home)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("log_level: debug"))
        .stdout(predicate::str::contains("export_path: study_plan.txt"));
}

#[test]
fn plan_rounds_halfway_shares_to_even() {
    let home = TempDir::new().unwrap();
    studyplan(&home)
        .args([
            "plan",
            "--today",
            "2026-10-19",
            "--hours",
            "1",
            "-s",
            "A@2026-10-22",
            "-s",
            "B@2026-10-24",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("  - A: 0.38 hours"))
        .stdout(predicate::str::contains("  - B: 0.62 hours"));
}
