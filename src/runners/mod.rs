// Runners Module
// Execution strategies honoring the task graph's ordering contract

pub mod distributed;
pub mod eager;

pub use distributed::{DispatchedTask, DistributedRunner, TaskDispatcher};
pub use eager::EagerRunner;

use crate::reporters::Reporter;
use crate::status::Status;
use crate::tasks::TaskInstance;

use async_trait::async_trait;
use serde_json::Value;

/// An execution strategy for a cleaned task set.
///
/// Implementations must invoke every task through [`TaskInstance::start`],
/// must not start a task before all of its declared parents reached a
/// terminal status, and must surface the run id to task bodies so shared
/// data stays correlated. The boolean return conveys aggregate success
/// only; callers inspect the reporter's trail for per-task outcomes.
#[async_trait]
pub trait Runner: Send + Sync {
    async fn start(
        &self,
        pipeline_id: &str,
        run_id: &str,
        tasks: Vec<TaskInstance>,
        input: Option<Value>,
        reporter: &dyn Reporter,
    ) -> bool;
}

pub(crate) fn report_pipeline_running(pipeline_id: &str, reporter: &dyn Reporter) {
    reporter.report_pipeline(pipeline_id, Status::Running, "Running");
}

pub(crate) fn report_pipeline_done(pipeline_id: &str, reporter: &dyn Reporter) {
    reporter.report_pipeline(pipeline_id, Status::Done, "Done");
}

pub(crate) fn report_pipeline_error(pipeline_id: &str, reporter: &dyn Reporter) {
    reporter.report_pipeline(pipeline_id, Status::RuntimeError, "Error");
}
