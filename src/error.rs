// Engine Errors
// Registry registration failures and task body errors

use thiserror::Error;

/// Errors raised when registering tasks or pipelines.
///
/// Duplicate registration is the only failure allowed to halt startup;
/// every other error kind in the engine flows through the reporter channel.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Multiple tasks named {0} have been registered")]
    DuplicateTask(String),

    #[error("Multiple pipelines named {0} have been registered")]
    DuplicatePipeline(String),
}

/// Error returned from a task's `run` body.
///
/// The message is reported verbatim as the RUNTIME_ERROR message; the
/// failure never propagates past the task's start boundary.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct RunError {
    message: String,
}

impl RunError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for RunError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for RunError {
    fn from(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_messages() {
        let err = RegistryError::DuplicateTask("demo.Echo".to_string());
        assert_eq!(
            err.to_string(),
            "Multiple tasks named demo.Echo have been registered"
        );
    }

    #[test]
    fn test_run_error_message_is_verbatim() {
        let err = RunError::new("boom");
        assert_eq!(err.to_string(), "boom");

        let err: RunError = "nope".into();
        assert_eq!(err.to_string(), "nope");
    }
}
