//! Fixed-length focus countdown.
//!
//! The timer has no clock of its own. Whoever drives it calls [`FocusTimer::tick`]
//! once per second and only while [`FocusTimer::is_running`] holds.

use tracing::{debug, info};

pub const FOCUS_SECONDS: u32 = 25 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Stopped,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Completed,
}

#[derive(Debug, Clone)]
pub struct FocusTimer {
    status: TimerStatus,
    remaining_seconds: u32,
}

impl Default for FocusTimer {
    fn default() -> Self {
        FocusTimer::new()
    }
}

impl FocusTimer {
    pub fn new() -> Self {
        FocusTimer {
            status: TimerStatus::Stopped,
            remaining_seconds: FOCUS_SECONDS,
        }
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    /// Returns `true` when the timer actually began running.
    ///
    /// A finished session has to be reset before it can start again.
    pub fn start(&mut self) -> bool {
        if self.is_running() || self.remaining_seconds == 0 {
            return false;
        }
        self.status = TimerStatus::Running;
        info!(remaining = self.remaining_seconds, "focus timer started");
        true
    }

    pub fn stop(&mut self) {
        if self.is_running() {
            info!(remaining = self.remaining_seconds, "focus timer paused");
        }
        self.status = TimerStatus::Stopped;
    }

    pub fn reset(&mut self) {
        self.status = TimerStatus::Stopped;
        self.remaining_seconds = FOCUS_SECONDS;
        debug!("focus timer reset");
    }

    /// Advances the countdown by one second.
    ///
    /// Reaching zero stops the timer and yields [`TimerEvent::Completed`].
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.is_running() || self.remaining_seconds == 0 {
            return None;
        }
        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.status = TimerStatus::Stopped;
            info!("focus session complete");
            return Some(TimerEvent::Completed);
        }
        None
    }

    pub fn display(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
