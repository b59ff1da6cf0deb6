// Status Model
// Shared status taxonomy for tasks and pipelines

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a task or pipeline over its lifecycle.
///
/// `ConfigError`, `ValidationError` and `Cancelled` are terminal failure
/// states reached strictly before a task's body runs. `Done` and
/// `RuntimeError` are reachable only after the body was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Pending,
    Running,
    Done,
    ConfigError,
    ValidationError,
    RuntimeError,
    Cancelled,
}

impl Status {
    /// Whether this status represents a task or pipeline failing.
    pub fn is_failed(self) -> bool {
        matches!(
            self,
            Status::ConfigError
                | Status::ValidationError
                | Status::RuntimeError
                | Status::Cancelled
        )
    }

    /// Whether this status represents a task or pipeline succeeding.
    pub fn is_success(self) -> bool {
        matches!(self, Status::Done)
    }

    /// Whether this status is final, successful or not.
    pub fn is_terminal(self) -> bool {
        self.is_failed() || self.is_success()
    }

    /// The wire value used in reports and persisted records.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::Running => "RUNNING",
            Status::Done => "DONE",
            Status::ConfigError => "CONFIG_ERROR",
            Status::ValidationError => "VALIDATION_ERROR",
            Status::RuntimeError => "RUNTIME_ERROR",
            Status::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
