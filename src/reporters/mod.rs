// Reporters Module
// Pluggable sinks for task and pipeline status transitions

pub mod logging;
pub mod memory;

pub use logging::LoggingReporter;
pub use memory::{MemoryReporter, StatusRecord};

use crate::status::Status;

/// Sink for status-transition events.
///
/// Every error kind in the engine surfaces through this channel; runners and
/// pipelines never raise config, validation or runtime failures to callers.
/// Exactly one of pipeline id and task id is set per event.
pub trait Reporter: Send + Sync {
    fn report(
        &self,
        pipeline_id: Option<&str>,
        task_id: Option<&str>,
        status: Status,
        message: &str,
    );

    fn report_task(&self, task_id: &str, status: Status, message: &str) {
        self.report(None, Some(task_id), status, message);
    }

    fn report_pipeline(&self, pipeline_id: &str, status: Status, message: &str) {
        self.report(Some(pipeline_id), None, status, message);
    }
}
