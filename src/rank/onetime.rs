//! Total order over one-time tasks.
//!
//! Priority mode is an ordered table of tiers, each a predicate plus the
//! key that breaks ties inside it. A pair from different tiers is decided
//! by tier position alone; dates never compare across tiers.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Task, Urgency};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Default,
    DueAsc,
    DueDesc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TierKey {
    /// Earliest due date first. Only used by tiers whose predicate
    /// guarantees a due date.
    DueAsc,
    /// Newest creation first.
    CreatedDesc,
}

struct Tier {
    name: &'static str,
    applies: fn(&Task, NaiveDate) -> bool,
    key: TierKey,
}

fn critical_late(t: &Task, today: NaiveDate) -> bool {
    t.urgency == Urgency::Critical && t.is_late(today)
}

fn normal_late(t: &Task, today: NaiveDate) -> bool {
    t.urgency == Urgency::Normal && t.is_late(today)
}

fn critical_due(t: &Task, today: NaiveDate) -> bool {
    t.urgency == Urgency::Critical && t.due_date.is_some() && !t.is_late(today)
}

fn critical_undated(t: &Task, _today: NaiveDate) -> bool {
    t.urgency == Urgency::Critical && t.due_date.is_none()
}

fn normal_due(t: &Task, today: NaiveDate) -> bool {
    t.urgency == Urgency::Normal && t.due_date.is_some() && !t.is_late(today)
}

fn normal_undated(t: &Task, _today: NaiveDate) -> bool {
    t.urgency == Urgency::Normal && t.due_date.is_none()
}

/// Evaluated top to bottom, first match wins. Every non-completed task
/// matches exactly one tier.
const TIERS: [Tier; 6] = [
    Tier { name: "critical-late", applies: critical_late, key: TierKey::DueAsc },
    Tier { name: "normal-late", applies: normal_late, key: TierKey::DueAsc },
    Tier { name: "critical-due", applies: critical_due, key: TierKey::DueAsc },
    Tier { name: "critical-undated", applies: critical_undated, key: TierKey::CreatedDesc },
    Tier { name: "normal-due", applies: normal_due, key: TierKey::DueAsc },
    Tier { name: "normal-undated", applies: normal_undated, key: TierKey::CreatedDesc },
];

/// Position of the first matching tier. Exposed for tier-by-tier auditing
/// in tests.
pub(crate) fn tier_index(task: &Task, today: NaiveDate) -> usize {
    TIERS
        .iter()
        .position(|tier| (tier.applies)(task, today))
        .unwrap_or(TIERS.len())
}

#[allow(dead_code)]
pub(crate) fn tier_name(task: &Task, today: NaiveDate) -> &'static str {
    TIERS
        .get(tier_index(task, today))
        .map(|tier| tier.name)
        .unwrap_or("unmatched")
}

/// Order `tasks` per `mode`. Completed tasks sort after all non-completed
/// ones in every mode, newest creation first among themselves. Sorting is
/// stable, so pairs the mode has no opinion on keep their input order.
pub fn rank(mut tasks: Vec<Task>, mode: SortMode, today: NaiveDate) -> Vec<Task> {
    match mode {
        SortMode::Default => tasks.sort_by(|a, b| compare_default(a, b, today)),
        SortMode::DueAsc => tasks.sort_by(|a, b| compare_due(a, b, true)),
        SortMode::DueDesc => tasks.sort_by(|a, b| compare_due(a, b, false)),
    }
    tasks
}

/// Completed-last pinning shared by every mode. Returns `None` when both
/// tasks are open and the mode's own rules decide.
fn compare_pinned(a: &Task, b: &Task) -> Option<Ordering> {
    match (a.completed, b.completed) {
        (true, false) => Some(Ordering::Greater),
        (false, true) => Some(Ordering::Less),
        (true, true) => Some(b.created_at.cmp(&a.created_at)),
        (false, false) => None,
    }
}

fn compare_default(a: &Task, b: &Task, today: NaiveDate) -> Ordering {
    if let Some(ordering) = compare_pinned(a, b) {
        return ordering;
    }
    let tier_a = tier_index(a, today);
    let tier_b = tier_index(b, today);
    if tier_a != tier_b {
        return tier_a.cmp(&tier_b);
    }
    match TIERS[tier_a].key {
        TierKey::DueAsc => a.due_date.cmp(&b.due_date),
        TierKey::CreatedDesc => b.created_at.cmp(&a.created_at),
    }
}

fn compare_due(a: &Task, b: &Task, ascending: bool) -> Ordering {
    if let Some(ordering) = compare_pinned(a, b) {
        return ordering;
    }
    match (a.due_date, b.due_date) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(due_a), Some(due_b)) => {
            if ascending {
                due_a.cmp(&due_b)
            } else {
                due_b.cmp(&due_a)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    fn task(id: &str, urgency: Urgency, due: Option<(i32, u32, u32)>, created_hour: u32) -> Task {
        Task {
            id: id.into(),
            name: format!("task {id}"),
            urgency,
            due_date: due.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, created_hour, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, 1, created_hour, 0, 0).unwrap(),
            completed: false,
            user_done: false,
            perfect_star: false,
            owner_name: "Sam Shore".into(),
            owner_initials: "SS".into(),
            owner_email: "sam@example.com".into(),
            comments: None,
            is_recurring: false,
            recurring_frequency: None,
            recurring_day: None,
            recurring_done: None,
        }
    }

    fn completed(mut t: Task) -> Task {
        t.completed = true;
        t
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_due_modes_reverse_each_other() {
        let tasks = vec![
            task("a", Urgency::Normal, Some((2024, 3, 12)), 8),
            task("b", Urgency::Normal, Some((2024, 3, 14)), 8),
            task("c", Urgency::Normal, Some((2024, 3, 13)), 8),
        ];
        let asc = rank(tasks.clone(), SortMode::DueAsc, today());
        let desc = rank(tasks, SortMode::DueDesc, today());
        let mut reversed = ids(&asc);
        reversed.reverse();
        assert_eq!(ids(&desc), reversed);
    }

    #[test]
    fn test_completed_pinned_last_in_every_mode() {
        let tasks = vec![
            completed(task("done-old", Urgency::Critical, Some((2024, 3, 1)), 6)),
            task("open", Urgency::Normal, Some((2024, 3, 20)), 8),
            completed(task("done-new", Urgency::Critical, Some((2024, 3, 2)), 9)),
        ];
        for mode in [SortMode::Default, SortMode::DueAsc, SortMode::DueDesc] {
            let ranked = rank(tasks.clone(), mode, today());
            // open first, then completed newest-created first
            assert_eq!(ids(&ranked), vec!["open", "done-new", "done-old"]);
        }
    }

    #[test]
    fn test_undated_sort_after_dated_in_due_modes() {
        let tasks = vec![
            task("undated", Urgency::Critical, None, 8),
            task("dated", Urgency::Normal, Some((2024, 3, 30)), 8),
        ];
        let asc = rank(tasks.clone(), SortMode::DueAsc, today());
        assert_eq!(ids(&asc), vec!["dated", "undated"]);
        let desc = rank(tasks, SortMode::DueDesc, today());
        assert_eq!(ids(&desc), vec!["dated", "undated"]);
    }

    #[test]
    fn test_same_tier_tie_break_is_order_independent() {
        let a = task("a", Urgency::Critical, Some((2024, 1, 1)), 8);
        let b = task("b", Urgency::Critical, Some((2024, 1, 2)), 8);
        let ranked_ab = rank(vec![a.clone(), b.clone()], SortMode::Default, today());
        let ranked_ba = rank(vec![b, a], SortMode::Default, today());
        assert_eq!(ids(&ranked_ab), vec!["a", "b"]);
        assert_eq!(ids(&ranked_ba), vec!["a", "b"]);
    }

    #[test]
    fn test_cross_tier_never_decided_by_date() {
        // Critical-late has a later due date than normal-late; tier still
        // wins.
        let tasks = vec![
            task("normal-late", Urgency::Normal, Some((2024, 3, 1)), 8),
            task("critical-late", Urgency::Critical, Some((2024, 3, 8)), 8),
        ];
        let ranked = rank(tasks, SortMode::Default, today());
        assert_eq!(ids(&ranked), vec!["critical-late", "normal-late"]);
    }

    #[test]
    fn test_late_normal_outranks_future_critical() {
        let tasks = vec![
            task("critical-future", Urgency::Critical, Some((2024, 3, 15)), 8),
            task("normal-late", Urgency::Normal, Some((2024, 3, 5)), 8),
        ];
        let ranked = rank(tasks, SortMode::Default, today());
        assert_eq!(ids(&ranked), vec!["normal-late", "critical-future"]);
    }

    #[test]
    fn test_critical_undated_outranks_normal_dated() {
        let tasks = vec![
            task("normal-dated", Urgency::Normal, Some((2024, 3, 11)), 8),
            task("critical-undated", Urgency::Critical, None, 8),
        ];
        let ranked = rank(tasks, SortMode::Default, today());
        assert_eq!(ids(&ranked), vec!["critical-undated", "normal-dated"]);
    }

    #[test]
    fn test_undated_normal_newest_created_first() {
        let t1 = task("older", Urgency::Normal, None, 6);
        let t2 = task("newer", Urgency::Normal, None, 12);
        let ranked = rank(vec![t1, t2], SortMode::Default, today());
        assert_eq!(ids(&ranked), vec!["newer", "older"]);
    }

    #[test]
    fn test_due_today_ranks_as_not_late() {
        let due_today = task("due-today", Urgency::Normal, Some((2024, 3, 10)), 8);
        assert_eq!(tier_name(&due_today, today()), "normal-due");
    }

    #[test]
    fn test_tier_table_covers_every_open_task() {
        let samples = vec![
            task("a", Urgency::Critical, Some((2024, 3, 1)), 8),
            task("b", Urgency::Normal, Some((2024, 3, 1)), 8),
            task("c", Urgency::Critical, Some((2024, 3, 20)), 8),
            task("d", Urgency::Critical, None, 8),
            task("e", Urgency::Normal, Some((2024, 3, 20)), 8),
            task("f", Urgency::Normal, None, 8),
        ];
        for (expected, sample) in samples.iter().enumerate() {
            assert_eq!(tier_index(sample, today()), expected);
        }
    }
}
