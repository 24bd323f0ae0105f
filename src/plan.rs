//! Proportional study-hour allocation.
//!
//! Each upcoming subject gets `daily_hours * days_left / total_days`, rounded to
//! hundredths. Subjects due today or earlier get nothing. The same split is
//! repeated for every day of the 7-day window.

use crate::model::{PlannerError, Registry};
use chrono::{Duration, NaiveDate};
use std::fmt::Write;

pub const PLAN_DAYS: i64 = 7;

const REPORT_TITLE: &str = "Smart Study Plan:";

#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub name: String,
    pub days_left: i64,
    pub hours: f64,
}

/// A generated 7-day schedule. Each day repeats the same allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub today: NaiveDate,
    pub daily_hours: f64,
    pub total_days: i64,
    pub allocations: Vec<Allocation>,
    /// Subjects due today or earlier, left out of the schedule.
    pub excluded: Vec<String>,
}

pub fn generate(
    registry: &Registry,
    daily_hours: f64,
    today: NaiveDate,
) -> Result<Plan, PlannerError> {
    if registry.is_empty() {
        return Err(PlannerError::NoSubjects);
    }
    if !daily_hours.is_finite() || daily_hours <= 0.0 {
        return Err(PlannerError::InvalidHours(daily_hours.to_string()));
    }

    today
        .checked_add_signed(Duration::days(PLAN_DAYS - 1))
        .ok_or(PlannerError::DateOutOfRange(today))?;

    let mut upcoming = Vec::new();
    let mut excluded = Vec::new();
    for subject in registry.list_chronological() {
        let days_left = subject.days_left(today);
        if days_left <= 0 {
            excluded.push(subject.name.clone());
        } else {
            upcoming.push((subject, days_left));
        }
    }

    let total_days: i64 = upcoming.iter().map(|(_, days)| days).sum();
    if total_days == 0 {
        return Err(PlannerError::NothingUpcoming);
    }

    let allocations = upcoming
        .into_iter()
        .map(|(subject, days_left)| Allocation {
            name: subject.name.clone(),
            days_left,
            hours: round_hundredths(daily_hours * (days_left as f64 / total_days as f64)),
        })
        .collect();

    Ok(Plan {
        today,
        daily_hours,
        total_days,
        allocations,
        excluded,
    })
}

/// Parses the free-text hours budget typed by the user.
pub fn parse_hours(input: &str) -> Result<f64, PlannerError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(hours) if hours.is_finite() && hours > 0.0 => Ok(hours),
        _ => Err(PlannerError::InvalidHours(trimmed.to_string())),
    }
}

impl Plan {
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..PLAN_DAYS)
            .map_while(move |offset| self.today.checked_add_signed(Duration::days(offset)))
    }

    pub fn allocated_per_day(&self) -> f64 {
        self.allocations.iter().map(|a| a.hours).sum()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", REPORT_TITLE);
        let _ = writeln!(out);
        for day in self.days() {
            let _ = writeln!(out, "{}", day.format("%Y-%m-%d"));
            for alloc in &self.allocations {
                let _ = writeln!(out, "  - {}: {} hours", alloc.name, format_hours(alloc.hours));
            }
            let _ = writeln!(out);
        }
        out
    }
}

/// Rounds the stored binary value to two places, ties to even.
///
/// The only exact ties at hundredths are odd multiples of 1/8.
fn round_hundredths(value: f64) -> f64 {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths.rem_euclid(2.0) == 1.0 {
        let down = (value * 100.0).floor();
        let even = if down.rem_euclid(2.0) == 0.0 {
            down
        } else {
            down + 1.0
        };
        return even / 100.0;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// At least one and at most two fractional digits: `1.0`, `0.3`, `4.25`.
pub fn format_hours(hours: f64) -> String {
    let fixed = format!("{:.2}", hours);
    let trimmed = fixed.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ErrorKind;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn registry(entries: &[(&str, i64)]) -> Registry {
        let mut registry = Registry::new();
        for (name, offset) in entries {
            registry
                .add(name, today() + Duration::days(*offset))
                .unwrap();
        }
        registry
    }

    #[test]
    fn proportional_split_matches_worked_example() {
        let plan = generate(&registry(&[("B", 8), ("A", 2)]), 5.0, today()).unwrap();
        assert_eq!(plan.total_days, 10);
        let summary: Vec<(&str, f64)> = plan
            .allocations
            .iter()
            .map(|a| (a.name.as_str(), a.hours))
            .collect();
        assert_eq!(summary, vec![("A", 1.0), ("B", 4.0)]);
    }

    #[test]
    fn allocation_sums_to_budget_within_rounding() {
        let reg = registry(&[("A", 3), ("B", 7), ("C", 11), ("D", 29)]);
        let plan = generate(&reg, 6.5, today()).unwrap();
        let tolerance = 0.01 * plan.allocations.len() as f64;
        assert!((plan.allocated_per_day() - 6.5).abs() <= tolerance);
    }

    #[test]
    fn past_and_today_subjects_are_excluded() {
        let reg = registry(&[("Old", -3), ("Today", 0), ("Next", 4)]);
        let plan = generate(&reg, 2.0, today()).unwrap();
        assert_eq!(plan.allocations.len(), 1);
        assert_eq!(plan.allocations[0].name, "Next");
        assert_eq!(plan.allocations[0].hours, 2.0);
        assert_eq!(plan.excluded, vec!["Old".to_string(), "Today".to_string()]);
    }

    #[test]
    fn all_past_due_is_a_validation_error() {
        let reg = registry(&[("Old", -1), ("Today", 0)]);
        let err = generate(&reg, 3.0, today()).unwrap_err();
        assert_eq!(err, PlannerError::NothingUpcoming);
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn empty_registry_is_rejected() {
        let err = generate(&Registry::new(), 3.0, today()).unwrap_err();
        assert_eq!(err, PlannerError::NoSubjects);
    }

    #[test]
    fn non_positive_or_non_finite_hours_are_rejected() {
        let reg = registry(&[("A", 2)]);
        for hours in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = generate(&reg, hours, today()).unwrap_err();
            assert!(matches!(err, PlannerError::InvalidHours(_)));
        }
    }

    #[test]
    fn parse_hours_accepts_positive_decimals_only() {
        assert_eq!(parse_hours(" 2.5 ").unwrap(), 2.5);
        assert!(parse_hours("0").is_err());
        assert!(parse_hours("-3").is_err());
        assert!(parse_hours("abc").is_err());
        assert!(parse_hours("").is_err());
        assert!(parse_hours("inf").is_err());
    }

    #[test]
    fn render_repeats_static_allocation_for_seven_days() {
        let plan = generate(&registry(&[("A", 2), ("B", 8)]), 5.0, today()).unwrap();
        let text = plan.render();
        assert!(text.starts_with("Smart Study Plan:\n\n2026-10-19\n"));
        assert_eq!(text.matches("  - A: 1.0 hours\n").count(), 7);
        assert_eq!(text.matches("  - B: 4.0 hours\n").count(), 7);
        assert!(text.contains("2026-10-25\n"));
        assert!(!text.contains("2026-10-26"));
        assert!(text.ends_with("hours\n\n"));
    }

    #[test]
    fn render_keeps_duplicate_names_as_separate_lines() {
        let plan = generate(&registry(&[("A", 1), ("A", 3)]), 4.0, today()).unwrap();
        let text = plan.render();
        let first_day: Vec<&str> = text.lines().skip(3).take(2).collect();
        assert_eq!(first_day, vec!["  - A: 1.0 hours", "  - A: 3.0 hours"]);
    }

    #[test]
    fn halfway_shares_round_to_even_hundredth() {
        let plan = generate(&registry(&[("A", 3), ("B", 5)]), 1.0, today()).unwrap();
        let hours: Vec<String> = plan.allocations.iter().map(|a| format_hours(a.hours)).collect();
        assert_eq!(hours, vec!["0.38", "0.62"]);

        let plan = generate(&registry(&[("A", 4), ("B", 4)]), 0.25, today()).unwrap();
        let hours: Vec<String> = plan.allocations.iter().map(|a| format_hours(a.hours)).collect();
        assert_eq!(hours, vec!["0.12", "0.12"]);
    }

    #[test]
    fn rounding_uses_the_stored_binary_value() {
        assert_eq!(round_hundredths(2.675), 2.67);
        assert_eq!(round_hundredths(1.005), 1.0);
        assert_eq!(round_hundredths(0.875), 0.88);
        assert_eq!(round_hundredths(1.126), 1.13);
        assert_eq!(round_hundredths(3.0), 3.0);
    }

    #[test]
    fn window_past_the_calendar_end_is_rejected() {
        let today = NaiveDate::MAX - Duration::days(2);
        let mut reg = Registry::new();
        reg.add("Far", NaiveDate::MAX).unwrap();
        let err = generate(&reg, 2.0, today).unwrap_err();
        assert_eq!(err, PlannerError::DateOutOfRange(today));
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn days_stop_at_the_calendar_end() {
        let plan = Plan {
            today: NaiveDate::MAX - Duration::days(2),
            daily_hours: 1.0,
            total_days: 2,
            allocations: Vec::new(),
            excluded: Vec::new(),
        };
        assert_eq!(plan.days().count(), 3);
        assert!(plan.render().contains(&NaiveDate::MAX.format("%Y-%m-%d").to_string()));
    }

    #[test]
    fn hours_format_trims_trailing_zeros() {
        assert_eq!(format_hours(1.0), "1.0");
        assert_eq!(format_hours(0.3), "0.3");
        assert_eq!(format_hours(4.25), "4.25");
        assert_eq!(format_hours(12.0), "12.0");
    }
}
