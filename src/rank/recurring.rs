//! Ordering and grouping of recurring tasks.
//!
//! Two distinct outputs: a flat ranking by frequency then anchor day, and
//! a sectioned view re-partitioned into weekly/monthly tables ordered by
//! pending-then-name. Daily and yearly are reserved categories with no day
//! semantics; they always rank after weekly and monthly.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{RecurringFrequency, Task};

/// Weekly before monthly, the reserved categories after, unknown last.
pub fn frequency_rank(frequency: Option<RecurringFrequency>) -> u8 {
    match frequency {
        Some(RecurringFrequency::Weekly) => 1,
        Some(RecurringFrequency::Monthly) => 2,
        Some(RecurringFrequency::Daily) => 3,
        Some(RecurringFrequency::Yearly) => 4,
        None => 5,
    }
}

/// Sunday-first weekday position; missing or unrecognized names sort last.
pub fn weekday_rank(day: Option<&str>) -> u8 {
    let Some(day) = day else {
        return 7;
    };
    match day.to_ascii_lowercase().as_str() {
        "sunday" => 0,
        "monday" => 1,
        "tuesday" => 2,
        "wednesday" => 3,
        "thursday" => 4,
        "friday" => 5,
        "saturday" => 6,
        _ => 7,
    }
}

/// Numeric day-of-month; missing or unparseable values sort last.
pub fn month_day_rank(day: Option<&str>) -> u32 {
    day.and_then(|d| d.trim().parse::<u32>().ok()).unwrap_or(999)
}

/// Order recurring tasks by frequency, then by anchor day within weekly
/// and monthly. Stable for pairs the rules have no opinion on.
pub fn rank_recurring(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(compare_recurring);
    tasks
}

fn compare_recurring(a: &Task, b: &Task) -> Ordering {
    let rank_a = frequency_rank(a.recurring_frequency);
    let rank_b = frequency_rank(b.recurring_frequency);
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }
    match a.recurring_frequency {
        Some(RecurringFrequency::Weekly) => {
            weekday_rank(a.recurring_day.as_deref()).cmp(&weekday_rank(b.recurring_day.as_deref()))
        }
        Some(RecurringFrequency::Monthly) => month_day_rank(a.recurring_day.as_deref())
            .cmp(&month_day_rank(b.recurring_day.as_deref())),
        _ => Ordering::Equal,
    }
}

/// The sectioned-table view: weekly and monthly tasks in independent
/// sections, each ordered pending-first then by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrequencyTables {
    pub weekly: Vec<Task>,
    pub monthly: Vec<Task>,
}

pub fn frequency_tables(tasks: &[Task]) -> FrequencyTables {
    let mut tables = FrequencyTables::default();
    for task in tasks {
        match task.recurring_frequency {
            Some(RecurringFrequency::Weekly) => tables.weekly.push(task.clone()),
            Some(RecurringFrequency::Monthly) => tables.monthly.push(task.clone()),
            _ => {}
        }
    }
    tables.weekly.sort_by(compare_table_row);
    tables.monthly.sort_by(compare_table_row);
    tables
}

fn compare_table_row(a: &Task, b: &Task) -> Ordering {
    let done_a = a.recurring_done.unwrap_or(false);
    let done_b = b.recurring_done.unwrap_or(false);
    done_a.cmp(&done_b).then_with(|| a.name.cmp(&b.name))
}
