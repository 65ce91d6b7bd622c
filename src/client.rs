//! Orchestration over the remote store, the cache, and the pure ranking
//! modules.
//!
//! Reads go cache-first; the cache is consulted for trust (dirty flag,
//! expiry) and the remote store is hit only when it cannot be trusted.
//! Mutations go remote-first: the remote call is awaited before any cache
//! write, so a failed mutation leaves local state unchanged. There is no
//! in-flight de-duplication and no retry; concurrent edits resolve as
//! last-successful-fetch-wins.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::TaskCache;
use crate::clock::Clock;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::models::{NewTask, Task, TaskKind, TaskPatch};
use crate::rank::{self, FrequencyTables, SectionedTasks, SortMode};
use crate::remote::{Filter, ListQuery, Order, RemoteStore};

pub struct TaskClient {
    remote: Arc<dyn RemoteStore>,
    cache: TaskCache,
    clock: Arc<dyn Clock>,
    config: ClientConfig,
}

impl TaskClient {
    pub fn new(
        remote: Arc<dyn RemoteStore>,
        cache: TaskCache,
        clock: Arc<dyn Clock>,
        config: ClientConfig,
    ) -> Self {
        Self {
            remote,
            cache,
            clock,
            config,
        }
    }

    pub fn cache(&self) -> &TaskCache {
        &self.cache
    }

    /// The task collection for `kind`, served from cache when the cached
    /// payload can be trusted, refetched otherwise. Exactly one remote
    /// attempt on a miss; fetch failures propagate and leave the cache
    /// untouched.
    pub async fn get_tasks(&self, kind: TaskKind, force_refresh: bool) -> Result<Vec<Task>> {
        if !force_refresh && !self.cache.is_dirty(kind) && self.cache.is_fresh(kind) {
            if let Some(tasks) = self.cache.cached(kind) {
                debug!(kind = kind.as_str(), count = tasks.len(), "serving cached tasks");
                return Ok(tasks);
            }
        }

        info!(kind = kind.as_str(), force_refresh, "fetching tasks from remote store");
        let query = ListQuery::for_kind(kind, self.config.list_limit);
        let tasks = self.remote.list(query).await?;
        self.cache.save_tasks(kind, &tasks)?;
        Ok(tasks)
    }

    /// Flat ranked sequence of active one-time tasks (the filtered view;
    /// no section grouping).
    pub async fn active_tasks(&self, mode: SortMode) -> Result<Vec<Task>> {
        let tasks = self.get_tasks(TaskKind::OneTime, false).await?;
        let active: Vec<Task> = tasks
            .into_iter()
            .filter(|t| !t.completed && !t.user_done)
            .collect();
        Ok(rank::rank(active, mode, self.clock.today()))
    }

    /// Ranked one-time tasks partitioned into the display buckets (the
    /// unfiltered view).
    pub async fn sectioned_tasks(&self, mode: SortMode) -> Result<SectionedTasks> {
        let tasks = self.get_tasks(TaskKind::OneTime, false).await?;
        let ranked = rank::rank(tasks, mode, self.clock.today());
        Ok(rank::group_sections(ranked))
    }

    /// Recurring tasks ordered by frequency then anchor day.
    pub async fn recurring_tasks(&self) -> Result<Vec<Task>> {
        let tasks = self.get_tasks(TaskKind::Recurring, false).await?;
        Ok(rank::rank_recurring(tasks))
    }

    /// Recurring tasks re-partitioned into the weekly/monthly tables.
    pub async fn recurring_tables(&self) -> Result<FrequencyTables> {
        let tasks = self.get_tasks(TaskKind::Recurring, false).await?;
        Ok(rank::frequency_tables(&tasks))
    }

    /// The review queue: submitted tasks, most recently updated first.
    /// Always fetched remotely; the queue is not part of the per-kind
    /// cache.
    pub async fn validation_queue(&self) -> Result<Vec<Task>> {
        let query = ListQuery::new(vec![Filter::UserDone(true)], self.config.list_limit)
            .ordered(Order::UpdatedDesc);
        self.remote.list(query).await
    }

    /// All tasks owned by `email`. Always fetched remotely.
    pub async fn owner_tasks(&self, email: &str) -> Result<Vec<Task>> {
        let query = ListQuery::new(
            vec![Filter::OwnerEmail(email.to_string())],
            self.config.list_limit,
        );
        self.remote.list(query).await
    }

    pub async fn create_task(&self, new_task: NewTask) -> Result<Task> {
        let task = self.remote.create(new_task).await?;
        self.cache.add_task(&task)?;
        Ok(task)
    }

    pub async fn update_task(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        let task = self.remote.update(id, patch).await?;
        self.cache.update_task(&task)?;
        Ok(task)
    }

    pub async fn delete_task(&self, kind: TaskKind, id: &str) -> Result<()> {
        self.remote.delete(id).await?;
        self.cache.remove_task(kind, id)
    }

    /// Toggle completion. Un-completing also clears the commendation flag,
    /// which never outlives completion.
    pub async fn set_completed(&self, id: &str, completed: bool) -> Result<Task> {
        let patch = TaskPatch {
            completed: Some(completed),
            perfect_star: if completed { None } else { Some(false) },
            ..Default::default()
        };
        self.update_task(id, patch).await
    }

    /// Toggle the current recurrence cycle's completion.
    pub async fn set_recurring_done(&self, id: &str, done: bool) -> Result<Task> {
        let patch = TaskPatch {
            recurring_done: Some(done),
            ..Default::default()
        };
        self.update_task(id, patch).await
    }

    /// Owner submits the task for review.
    pub async fn submit_for_review(&self, id: &str) -> Result<Task> {
        let patch = TaskPatch {
            user_done: Some(true),
            ..Default::default()
        };
        self.update_task(id, patch).await
    }

    /// Reviewer sends the task back to the owner.
    pub async fn revert_review(&self, id: &str) -> Result<Task> {
        let patch = TaskPatch {
            user_done: Some(false),
            ..Default::default()
        };
        self.update_task(id, patch).await
    }

    /// Reviewer accepts the submission.
    pub async fn approve_review(&self, id: &str) -> Result<Task> {
        let patch = TaskPatch {
            completed: Some(true),
            ..Default::default()
        };
        self.update_task(id, patch).await
    }

    /// Reviewer accepts the submission with a commendation. The two flags
    /// are set together, never independently.
    pub async fn commend(&self, id: &str) -> Result<Task> {
        let patch = TaskPatch {
            completed: Some(true),
            perfect_star: Some(true),
            ..Default::default()
        };
        self.update_task(id, patch).await
    }
}
