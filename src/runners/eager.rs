// Eager Runner
// Single-threaded, in-process execution strictly in scheduler order

use crate::pipeline::TaskGraph;
use crate::reporters::Reporter;
use crate::runners::{report_pipeline_done, report_pipeline_error, report_pipeline_running, Runner};
use crate::store::{InMemoryTaskStore, TaskStore};
use crate::tasks::{TaskContext, TaskInstance};

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Runner that executes one task at a time in the graph's execution order.
///
/// Even tasks with no mutual dependency run serially, which makes run
/// sequences reproducible; suited to local execution and test harnesses.
/// A task failing at runtime is local: the remaining tasks still run and
/// the pipeline ends in RUNTIME_ERROR once everything finished.
pub struct EagerRunner {
    store: Arc<dyn TaskStore>,
}

impl EagerRunner {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryTaskStore::new()),
        }
    }

    /// Use a caller-provided store, e.g. to share data across runs.
    pub fn with_store(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }
}

impl Default for EagerRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Runner for EagerRunner {
    async fn start(
        &self,
        pipeline_id: &str,
        run_id: &str,
        tasks: Vec<TaskInstance>,
        input: Option<Value>,
        reporter: &dyn Reporter,
    ) -> bool {
        // Cleaning already validated the graph; a failure here means the
        // task set was tampered with between cleaning and execution.
        let graph = match TaskGraph::build(&tasks) {
            Ok(graph) => graph,
            Err(err) => {
                tracing::error!(pipeline_id, error = %err, "task set no longer forms a valid graph");
                report_pipeline_error(pipeline_id, reporter);
                return false;
            }
        };

        report_pipeline_running(pipeline_id, reporter);

        let mut all_succeeded = true;
        for &index in graph.execution_order() {
            let task = &tasks[index];
            let ctx = TaskContext::new(pipeline_id, run_id, task.id(), Arc::clone(&self.store));
            if !task.start(&ctx, input.as_ref(), reporter).await {
                all_succeeded = false;
            }
        }

        if all_succeeded {
            report_pipeline_done(pipeline_id, reporter);
        } else {
            report_pipeline_error(pipeline_id, reporter);
        }
        all_succeeded
    }
}
