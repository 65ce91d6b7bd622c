//! Display buckets for the unfiltered one-time view.

use serde::{Deserialize, Serialize};

use crate::models::Task;

pub const ACTIVE_TITLE: &str = "Active Tasks";
pub const AWAITING_REVIEW_TITLE: &str = "Tasks Awaiting Review";
pub const COMPLETED_TITLE: &str = "Tasks Completed";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub count: usize,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionedTasks {
    pub sections: Vec<Section>,
    pub is_empty: bool,
}

/// Partition an already ranked sequence into the three display buckets,
/// keeping ranking order inside each. The input order is trusted; this
/// function does not re-sort.
pub fn group_sections(ranked: Vec<Task>) -> SectionedTasks {
    let is_empty = ranked.is_empty();
    let mut active = Vec::new();
    let mut awaiting = Vec::new();
    let mut completed = Vec::new();

    for task in ranked {
        if task.completed {
            completed.push(task);
        } else if task.user_done {
            awaiting.push(task);
        } else {
            active.push(task);
        }
    }

    let sections = vec![
        section(ACTIVE_TITLE, active),
        section(AWAITING_REVIEW_TITLE, awaiting),
        section(COMPLETED_TITLE, completed),
    ];
    SectionedTasks { sections, is_empty }
}

fn section(title: &str, tasks: Vec<Task>) -> Section {
    Section {
        title: title.to_string(),
        count: tasks.len(),
        tasks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Urgency;
    use chrono::{TimeZone, Utc};

    fn task(id: &str, completed: bool, user_done: bool) -> Task {
        Task {
            id: id.into(),
            name: format!("task {id}"),
            urgency: Urgency::Normal,
            due_date: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
            completed,
            user_done,
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

    #[test]
    fn test_buckets_in_display_order_with_counts() {
        let grouped = group_sections(vec![
            task("active-1", false, false),
            task("review-1", false, true),
            task("done-1", true, false),
            task("active-2", false, false),
        ]);
        assert!(!grouped.is_empty);
        let titles: Vec<&str> = grouped.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![ACTIVE_TITLE, AWAITING_REVIEW_TITLE, COMPLETED_TITLE]
        );
        assert_eq!(grouped.sections[0].count, 2);
        assert_eq!(grouped.sections[1].count, 1);
        assert_eq!(grouped.sections[2].count, 1);
    }

    #[test]
    fn test_ranking_order_preserved_inside_buckets() {
        let grouped = group_sections(vec![
            task("a", false, false),
            task("done", true, false),
            task("b", false, false),
        ]);
        let active_ids: Vec<&str> = grouped.sections[0]
            .tasks
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(active_ids, vec!["a", "b"]);
    }

    #[test]
    fn test_completed_bucket_wins_over_user_done() {
        // completed + user_done belongs in the completed bucket
        let grouped = group_sections(vec![task("both", true, true)]);
        assert_eq!(grouped.sections[1].count, 0);
        assert_eq!(grouped.sections[2].count, 1);
    }

    #[test]
    fn test_empty_input_flagged() {
        let grouped = group_sections(Vec::new());
        assert!(grouped.is_empty);
        assert!(grouped.sections.iter().all(|s| s.count == 0));
    }
}
