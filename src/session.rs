//! The one controller behind every user action.
//!
//! A [`Session`] owns the subject registry, the focus timer and the text of the
//! last generated plan. A failed action returns the error and leaves all three
//! as they were.

use crate::model::{PlannerError, Registry, Subject};
use crate::plan::{self, Plan};
use crate::storage::export_plan;
use crate::timer::{FocusTimer, TimerEvent};
use anyhow::Result;
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct Session {
    registry: Registry,
    timer: FocusTimer,
    output: String,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn timer(&self) -> &FocusTimer {
        &self.timer
    }

    /// Rendered text of the last successful plan, empty before the first one.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn add_subject(
        &mut self,
        name: &str,
        target_date: NaiveDate,
    ) -> Result<usize, PlannerError> {
        let count = self.registry.add(name, target_date)?;
        info!(name = name.trim(), %target_date, count, "subject added");
        Ok(count)
    }

    pub fn remove_subject(&mut self, index: usize) -> Result<Subject, PlannerError> {
        let removed = self.registry.remove_at(index)?;
        info!(name = %removed.name, index, "subject removed");
        Ok(removed)
    }

    /// Generates a plan and replaces the output text with its rendering.
    pub fn generate_plan(
        &mut self,
        daily_hours: f64,
        today: NaiveDate,
    ) -> Result<Plan, PlannerError> {
        let plan = plan::generate(&self.registry, daily_hours, today)?;
        if !plan.excluded.is_empty() {
            warn!(
                excluded = plan.excluded.len(),
                "subjects due today or earlier left out of plan"
            );
        }
        for alloc in &plan.allocations {
            debug!(
                name = %alloc.name,
                days_left = alloc.days_left,
                hours = alloc.hours,
                "allocation"
            );
        }
        info!(
            included = plan.allocations.len(),
            total_days = plan.total_days,
            allocated = plan.allocated_per_day(),
            "plan generated"
        );
        self.output = plan.render();
        Ok(plan)
    }

    /// Writes the current output text, even when no plan has been generated yet.
    pub fn save_output(&self, path: &Path) -> Result<()> {
        export_plan(path, &self.output)?;
        info!(path = %path.display(), bytes = self.output.len(), "plan exported");
        Ok(())
    }

    pub fn start_timer(&mut self) -> bool {
        self.timer.start()
    }

    pub fn stop_timer(&mut self) {
        self.timer.stop();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    pub fn tick_timer(&mut self) -> Option<TimerEvent> {
        self.timer.tick()
    }
}
