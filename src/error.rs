use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    RemoteFetch,
    RemoteMutation,
    TaskNotFound,
    Storage,
    Serialization,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RemoteFetch => "REMOTE_FETCH",
            Self::RemoteMutation => "REMOTE_MUTATION",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::Storage => "STORAGE",
            Self::Serialization => "SERIALIZATION",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct TaskdeckError {
    pub code: ErrorCode,
    pub message: String,
}

impl TaskdeckError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn remote_fetch(message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::RemoteFetch,
            format!("Could not load tasks: {}", message.into()),
        )
    }

    pub fn remote_mutation(operation: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::RemoteMutation,
            format!("Task {operation} failed: {}", message.into()),
        )
    }

    pub fn task_not_found(id: &str) -> Self {
        Self::new(ErrorCode::TaskNotFound, format!("Task not found: {id}"))
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Storage, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Serialization, message)
    }
}

impl From<rusqlite::Error> for TaskdeckError {
    fn from(e: rusqlite::Error) -> Self {
        Self::storage(e.to_string())
    }
}

impl From<serde_json::Error> for TaskdeckError {
    fn from(e: serde_json::Error) -> Self {
        Self::serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TaskdeckError>;
