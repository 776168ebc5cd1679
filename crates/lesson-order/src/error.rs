//! Ordering Errors

use std::time::Duration;
use thiserror::Error;

use crate::lesson::{LessonId, ModuleId};

pub type OrderResult<T> = Result<T, OrderError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Gesture referenced an index or module that does not exist
    #[error("invalid gesture: {0}")]
    InvalidGesture(String),
    /// The list was replaced between drag start and drop
    #[error("list for {0} changed since the drag started")]
    StaleSnapshot(ModuleId),
    /// A reorder is already in flight for this module
    #[error("a reorder is already in flight for {0}")]
    Busy(ModuleId),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("no response after {0:?}")]
    Timeout(Duration),
    /// Server rejected the payload (duplicate, unknown, missing or cross-module ids)
    #[error("validation failed: {0}")]
    Validation(String),
    /// Another client changed the module's order since our last read
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
}

/// Coarse classification used for logging and user-facing notices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Handled without touching the network
    Local,
    Transport,
    Validation,
    Conflict,
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::InvalidGesture(_) | OrderError::StaleSnapshot(_) | OrderError::Busy(_) => {
                ErrorKind::Local
            }
            OrderError::Transport(_) | OrderError::Timeout(_) => ErrorKind::Transport,
            OrderError::Validation(_) | OrderError::NotFound(_) => ErrorKind::Validation,
            OrderError::Conflict(_) => ErrorKind::Conflict,
        }
    }

    pub(crate) fn duplicate(id: LessonId) -> Self {
        OrderError::Validation(format!("{} appears more than once", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(OrderError::Busy(ModuleId(1)).kind(), ErrorKind::Local);
        assert_eq!(OrderError::Timeout(Duration::from_secs(1)).kind(), ErrorKind::Transport);
        assert_eq!(OrderError::NotFound("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(OrderError::Conflict("x".into()).kind(), ErrorKind::Conflict);
    }
}
