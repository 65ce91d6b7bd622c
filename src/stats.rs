//! Count summaries derived from task collections. Lateness everywhere is
//! the single calendar-day predicate on [`Task`].

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{RecurringFrequency, Task};

/// One-time task counts. `open` and `overdue` are restricted to
/// non-completed tasks; `active` additionally excludes tasks awaiting
/// review.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct OneTimeStats {
    pub total: usize,
    pub completed: usize,
    pub open: usize,
    pub overdue: usize,
    pub active: usize,
    pub active_overdue: usize,
    pub user_done: usize,
}

pub fn one_time_stats(tasks: &[Task], today: NaiveDate) -> OneTimeStats {
    let mut stats = OneTimeStats::default();
    for task in tasks {
        stats.total += 1;
        if task.completed {
            stats.completed += 1;
            continue;
        }
        stats.open += 1;
        let late = task.is_late(today);
        if late {
            stats.overdue += 1;
        }
        if task.user_done {
            stats.user_done += 1;
        } else {
            stats.active += 1;
            if late {
                stats.active_overdue += 1;
            }
        }
    }
    stats
}

/// Review-queue counts over tasks submitted by their owners.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub well_done: usize,
}

pub fn validation_stats(tasks: &[Task]) -> ValidationStats {
    let mut stats = ValidationStats::default();
    for task in tasks {
        stats.total += 1;
        if task.completed {
            stats.completed += 1;
        } else if task.user_done {
            stats.pending += 1;
        }
        if task.perfect_star {
            stats.well_done += 1;
        }
    }
    stats
}

/// Per-cycle counts for one recurrence frequency.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyStats {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
}

impl FrequencyStats {
    fn record(&mut self, done: bool) {
        self.total += 1;
        if done {
            self.closed += 1;
        } else {
            self.open += 1;
        }
    }
}

/// Recurring counts for all four frequencies, reserved ones included.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RecurringStats {
    pub weekly: FrequencyStats,
    pub monthly: FrequencyStats,
    pub daily: FrequencyStats,
    pub yearly: FrequencyStats,
}

pub fn recurring_stats(tasks: &[Task]) -> RecurringStats {
    let mut stats = RecurringStats::default();
    for task in tasks {
        let done = task.recurring_done.unwrap_or(false);
        match task.recurring_frequency {
            Some(RecurringFrequency::Weekly) => stats.weekly.record(done),
            Some(RecurringFrequency::Monthly) => stats.monthly.record(done),
            Some(RecurringFrequency::Daily) => stats.daily.record(done),
            Some(RecurringFrequency::Yearly) => stats.yearly.record(done),
            None => {}
        }
    }
    stats
}
