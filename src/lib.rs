//! Core of a task-tracking client backed by a remote document store:
//! tiered task ranking, recurring-task ordering, statistics, and a
//! persisted cache layer with dirty flags and session-reload detection.
//!
//! The remote store is an external collaborator behind the
//! [`remote::RemoteStore`] trait; [`client::TaskClient`] mediates between
//! it and the [`cache::TaskCache`], fetching only when the cached payload
//! cannot be trusted and pairing every confirmed remote mutation with the
//! matching cache write.

pub mod cache;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod rank;
pub mod remote;
pub mod stats;
pub mod storage;
pub mod testing;

pub use cache::{SessionTracker, TaskCache};
pub use client::TaskClient;
pub use clock::{Clock, SystemClock};
pub use config::ClientConfig;
pub use error::{ErrorCode, Result, TaskdeckError};
pub use models::{NewTask, RecurringFrequency, Task, TaskKind, TaskPatch, Urgency};
pub use rank::SortMode;
pub use remote::RemoteStore;
