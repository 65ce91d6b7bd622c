//! Remote document-store boundary.
//!
//! The backend is an external collaborator: an opaque async service
//! holding task documents, queried with equality-only filters. Everything
//! this crate knows about it is the [`RemoteStore`] trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewTask, Task, TaskKind, TaskPatch};

/// Equality predicate on a task document field. The backend supports no
/// other comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    IsRecurring(bool),
    OwnerEmail(String),
    UserDone(bool),
}

/// Server-side ordering. Only the validation queue asks for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    UpdatedDesc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filters: Vec<Filter>,
    pub limit: usize,
    pub order: Option<Order>,
}

impl ListQuery {
    pub fn new(filters: Vec<Filter>, limit: usize) -> Self {
        Self {
            filters,
            limit,
            order: None,
        }
    }

    /// The per-kind collection query used by the cached read path.
    pub fn for_kind(kind: TaskKind, limit: usize) -> Self {
        Self::new(
            vec![Filter::IsRecurring(kind == TaskKind::Recurring)],
            limit,
        )
    }

    pub fn ordered(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }
}

/// Async CRUD surface of the backing document store.
///
/// List failures surface as [`crate::error::ErrorCode::RemoteFetch`],
/// mutation failures as [`crate::error::ErrorCode::RemoteMutation`]; the
/// caller never retries.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list(&self, query: ListQuery) -> Result<Vec<Task>>;

    /// Create a document; the store assigns id and timestamps and returns
    /// the canonical record.
    async fn create(&self, new_task: NewTask) -> Result<Task>;

    /// Patch a document and return the updated record.
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task>;

    async fn delete(&self, id: &str) -> Result<()>;
}
