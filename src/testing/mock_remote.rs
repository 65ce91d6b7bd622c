//! Scriptable in-memory [`RemoteStore`] for tests: records every list
//! query, counts calls, and can be told to fail the next operation.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use ulid::Ulid;

use crate::error::{Result, TaskdeckError};
use crate::models::{NewTask, Task, TaskPatch};
use crate::remote::{Filter, ListQuery, Order, RemoteStore};

#[derive(Default)]
pub struct MockRemote {
    tasks: Mutex<Vec<Task>>,
    list_queries: Mutex<Vec<ListQuery>>,
    list_failures: Mutex<VecDeque<String>>,
    mutation_failures: Mutex<VecDeque<String>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            ..Default::default()
        }
    }

    /// Queue a failure for the next `list` call; later calls succeed again.
    pub fn fail_next_list(&self, message: impl Into<String>) {
        self.list_failures.lock().unwrap().push_back(message.into());
    }

    /// Queue a failure for the next create/update/delete call.
    pub fn fail_next_mutation(&self, message: impl Into<String>) {
        self.mutation_failures
            .lock()
            .unwrap()
            .push_back(message.into());
    }

    pub fn list_call_count(&self) -> usize {
        self.list_queries.lock().unwrap().len()
    }

    pub fn last_list_query(&self) -> Option<ListQuery> {
        self.list_queries.lock().unwrap().last().cloned()
    }

    /// Current backing collection, for asserting on remote state.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.lock().unwrap().clone()
    }

    fn next_mutation_failure(&self, operation: &str) -> Result<()> {
        match self.mutation_failures.lock().unwrap().pop_front() {
            Some(message) => Err(TaskdeckError::remote_mutation(operation, message)),
            None => Ok(()),
        }
    }
}

fn matches(task: &Task, filter: &Filter) -> bool {
    match filter {
        Filter::IsRecurring(value) => task.is_recurring == *value,
        Filter::OwnerEmail(email) => task.owner_email == *email,
        Filter::UserDone(value) => task.user_done == *value,
    }
}

#[async_trait]
impl RemoteStore for MockRemote {
    async fn list(&self, query: ListQuery) -> Result<Vec<Task>> {
        self.list_queries.lock().unwrap().push(query.clone());
        if let Some(message) = self.list_failures.lock().unwrap().pop_front() {
            return Err(TaskdeckError::remote_fetch(message));
        }

        let tasks = self.tasks.lock().unwrap();
        let mut result: Vec<Task> = tasks
            .iter()
            .filter(|t| query.filters.iter().all(|f| matches(t, f)))
            .cloned()
            .collect();
        if let Some(Order::UpdatedDesc) = query.order {
            result.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        }
        result.truncate(query.limit);
        Ok(result)
    }

    async fn create(&self, new_task: NewTask) -> Result<Task> {
        self.next_mutation_failure("create")?;
        let now = Utc::now();
        let task = Task {
            id: Ulid::new().to_string(),
            name: new_task.name,
            urgency: new_task.urgency,
            due_date: new_task.due_date,
            created_at: now,
            updated_at: now,
            completed: false,
            user_done: false,
            perfect_star: false,
            owner_name: new_task.owner_name,
            owner_initials: new_task.owner_initials,
            owner_email: new_task.owner_email,
            comments: new_task.comments,
            is_recurring: new_task.is_recurring,
            recurring_frequency: new_task.recurring_frequency,
            recurring_day: new_task.recurring_day,
            recurring_done: if new_task.is_recurring {
                Some(false)
            } else {
                None
            },
        };
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        self.next_mutation_failure("update")?;
        let mut tasks = self.tasks.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TaskdeckError::task_not_found(id))?;
        patch.apply(task);
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.next_mutation_failure("delete")?;
        let mut tasks = self.tasks.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(TaskdeckError::task_not_found(id));
        }
        Ok(())
    }
}
