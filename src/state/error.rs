//! State management-specific error types.

use super::navigation::ScreenId;

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Task title is empty after trimming whitespace
    #[error("Task title must not be empty")]
    EmptyTitle,

    /// Task not found in the store
    #[error("Task not found: {id}")]
    TaskNotFound { id: u64 },

    /// Navigation target is not registered with the shell
    #[error("Screen '{screen}' is not registered")]
    UnregisteredScreen { screen: ScreenId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_error_display() {
        let error = StateError::EmptyTitle;
        assert!(error.to_string().contains("must not be empty"));

        let error = StateError::TaskNotFound { id: 12 };
        assert!(error.to_string().contains("Task not found"));
        assert!(error.to_string().contains("12"));

        let error = StateError::UnregisteredScreen {
            screen: ScreenId::EditTask,
        };
        assert!(error.to_string().contains("EditTask"));
        assert!(error.to_string().contains("not registered"));
    }
}
