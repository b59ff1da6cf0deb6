// Logging Reporter
// Emits every status transition as a structured tracing event

use crate::reporters::Reporter;
use crate::status::Status;

/// Reporter that writes transitions to the `tracing` subscriber.
///
/// Keeps no state; suitable as the default observability sink or alongside
/// a durable reporter via a caller-side fan-out.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReporter;

impl LoggingReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for LoggingReporter {
    fn report(
        &self,
        pipeline_id: Option<&str>,
        task_id: Option<&str>,
        status: Status,
        message: &str,
    ) {
        if let Some(pipeline_id) = pipeline_id {
            tracing::info!(
                pipeline_id,
                status = status.as_str(),
                "Pipeline {pipeline_id} changed to state {status}: {message}"
            );
        } else if let Some(task_id) = task_id {
            tracing::info!(
                task_id,
                status = status.as_str(),
                "Task {task_id} changed to state {status}: {message}"
            );
        }
    }
}
