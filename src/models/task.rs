use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Normal,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Critical => "critical",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "normal" => Some(Self::Normal),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringFrequency {
    Weekly,
    Monthly,
    Daily,
    Yearly,
}

impl RecurringFrequency {
    pub const ALL: [RecurringFrequency; 4] =
        [Self::Weekly, Self::Monthly, Self::Daily, Self::Yearly];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Daily => "daily",
            Self::Yearly => "yearly",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "daily" => Some(Self::Daily),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }
}

/// Cache and list-filter discriminator. One-time and recurring tasks are
/// held in separate collections end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    OneTime,
    Recurring,
}

impl TaskKind {
    pub const ALL: [TaskKind; 2] = [Self::OneTime, Self::Recurring];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneTime => "onetime",
            Self::Recurring => "recurring",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub urgency: Urgency,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed: bool,
    /// Submitted by the owner, awaiting review.
    pub user_done: bool,
    /// Commendation flag, set only during review, always together with
    /// `completed`.
    pub perfect_star: bool,
    // Owner identity is a snapshot captured at assignment time, not a live
    // reference to a user registry.
    pub owner_name: String,
    pub owner_initials: String,
    pub owner_email: String,
    pub comments: Option<String>,
    pub is_recurring: bool,
    pub recurring_frequency: Option<RecurringFrequency>,
    /// Weekday name for weekly tasks, numeric day-of-month as a string for
    /// monthly tasks.
    pub recurring_day: Option<String>,
    /// Completion for the current recurrence cycle, independent of
    /// `completed`.
    pub recurring_done: Option<bool>,
}

impl Task {
    pub fn kind(&self) -> TaskKind {
        if self.is_recurring {
            TaskKind::Recurring
        } else {
            TaskKind::OneTime
        }
    }

    /// A task is late when its due date is strictly before `today`. The due
    /// day itself is never late, all day.
    pub fn is_late(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due < today,
            None => false,
        }
    }

    pub fn is_awaiting_review(&self) -> bool {
        self.user_done && !self.completed
    }
}

/// Creation payload. The remote store assigns `id`, `created_at` and
/// `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub name: String,
    pub urgency: Urgency,
    pub due_date: Option<NaiveDate>,
    pub owner_name: String,
    pub owner_initials: String,
    pub owner_email: String,
    pub comments: Option<String>,
    pub is_recurring: bool,
    pub recurring_frequency: Option<RecurringFrequency>,
    pub recurring_day: Option<String>,
}

impl NewTask {
    pub fn kind(&self) -> TaskKind {
        if self.is_recurring {
            TaskKind::Recurring
        } else {
            TaskKind::OneTime
        }
    }
}

/// Partial update. `None` leaves the remote field untouched; the
/// double-`Option` fields distinguish "leave alone" from "clear".
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub urgency: Option<Urgency>,
    pub due_date: Option<Option<NaiveDate>>,
    pub comments: Option<Option<String>>,
    pub completed: Option<bool>,
    pub user_done: Option<bool>,
    pub perfect_star: Option<bool>,
    pub recurring_frequency: Option<RecurringFrequency>,
    pub recurring_day: Option<String>,
    pub recurring_done: Option<bool>,
}

impl TaskPatch {
    /// Apply the patch to a task snapshot, leaving untouched fields as-is.
    /// `updated_at` is the store's concern and is not modified here.
    pub fn apply(&self, task: &mut Task) {
        if let Some(name) = &self.name {
            task.name = name.clone();
        }
        if let Some(urgency) = self.urgency {
            task.urgency = urgency;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(comments) = &self.comments {
            task.comments = comments.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(user_done) = self.user_done {
            task.user_done = user_done;
        }
        if let Some(perfect_star) = self.perfect_star {
            task.perfect_star = perfect_star;
        }
        if let Some(frequency) = self.recurring_frequency {
            task.recurring_frequency = Some(frequency);
        }
        if let Some(day) = &self.recurring_day {
            task.recurring_day = Some(day.clone());
        }
        if let Some(done) = self.recurring_done {
            task.recurring_done = Some(done);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn base_task() -> Task {
        Task {
            id: "t1".into(),
            name: "Water the plants".into(),
            urgency: Urgency::Normal,
            due_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            completed: false,
            user_done: false,
            perfect_star: false,
            owner_name: "Ada Lovelace".into(),
            owner_initials: "AL".into(),
            owner_email: "ada@example.com".into(),
            comments: None,
            is_recurring: false,
            recurring_frequency: None,
            recurring_day: None,
            recurring_done: None,
        }
    }

    #[test]
    fn test_due_today_is_not_late() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut task = base_task();
        task.due_date = Some(today);
        assert!(!task.is_late(today));
    }

    #[test]
    fn test_due_yesterday_is_late() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let mut task = base_task();
        task.due_date = Some(today.pred_opt().unwrap());
        assert!(task.is_late(today));
    }

    #[test]
    fn test_no_due_date_is_never_late() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert!(!base_task().is_late(today));
    }

    #[test]
    fn test_patch_clears_due_date() {
        let mut task = base_task();
        task.due_date = NaiveDate::from_ymd_opt(2024, 1, 1);
        let patch = TaskPatch {
            due_date: Some(None),
            ..Default::default()
        };
        patch.apply(&mut task);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn test_patch_leaves_unset_fields() {
        let mut task = base_task();
        let patch = TaskPatch {
            completed: Some(true),
            ..Default::default()
        };
        patch.apply(&mut task);
        assert!(task.completed);
        assert_eq!(task.name, "Water the plants");
        assert!(!task.user_done);
    }
}
