// Distributed Runner
// Wave-by-wave dispatch to an external worker substrate

use crate::pipeline::TaskGraph;
use crate::reporters::Reporter;
use crate::runners::{report_pipeline_done, report_pipeline_error, report_pipeline_running, Runner};
use crate::store::{InMemoryTaskStore, TaskStore};
use crate::tasks::{TaskContext, TaskInstance};

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// One unit of work handed to a dispatcher: the task bound to its run
/// context and input payload. Workers drive it through
/// [`DispatchedTask::start`] so status transitions match in-process
/// execution exactly.
pub struct DispatchedTask {
    task: TaskInstance,
    ctx: TaskContext,
    input: Option<Value>,
}

impl DispatchedTask {
    /// The entry id of the underlying task.
    pub fn id(&self) -> &str {
        self.task.id()
    }

    /// Run the task, reporting its transitions; returns success.
    pub async fn start(&self, reporter: &dyn Reporter) -> bool {
        self.task.start(&self.ctx, self.input.as_ref(), reporter).await
    }
}

/// Contract for the worker substrate behind a [`DistributedRunner`].
///
/// A dispatcher receives one wave of mutually independent tasks at a time
/// and may execute them concurrently, on any worker, under whatever
/// delivery guarantee its transport provides; those internals are out of
/// the engine's scope. Two obligations hold regardless of transport:
/// every task must be driven through [`DispatchedTask::start`], and
/// `dispatch` must not resolve until the whole wave is terminal. The
/// runner gates the next wave on it, which is how no task ever starts
/// before its parents finish. Within a wave, declaration order is the
/// recommended tie-break, not a mandate.
#[async_trait]
pub trait TaskDispatcher: Send + Sync {
    /// Execute one wave; returns whether every task in it succeeded.
    async fn dispatch(&self, wave: Vec<DispatchedTask>, reporter: &dyn Reporter) -> bool;
}

/// Runner that feeds the task graph's execution levels to a dispatcher,
/// one wave at a time.
///
/// Like the eager runner, a runtime failure inside a wave is local: later
/// waves are still dispatched and the pipeline ends in RUNTIME_ERROR once
/// every wave completed.
pub struct DistributedRunner<D> {
    dispatcher: D,
    store: Arc<dyn TaskStore>,
}

impl<D: TaskDispatcher> DistributedRunner<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            dispatcher,
            store: Arc::new(InMemoryTaskStore::new()),
        }
    }

    /// Use a store shared with the worker substrate.
    pub fn with_store(dispatcher: D, store: Arc<dyn TaskStore>) -> Self {
        Self { dispatcher, store }
    }
}

#[async_trait]
impl<D: TaskDispatcher> Runner for DistributedRunner<D> {
    async fn start(
        &self,
        pipeline_id: &str,
        run_id: &str,
        tasks: Vec<TaskInstance>,
        input: Option<Value>,
        reporter: &dyn Reporter,
    ) -> bool {
        let graph = match TaskGraph::build(&tasks) {
            Ok(graph) => graph,
            Err(err) => {
                tracing::error!(pipeline_id, error = %err, "task set no longer forms a valid graph");
                report_pipeline_error(pipeline_id, reporter);
                return false;
            }
        };
        let levels = graph.execution_levels();

        report_pipeline_running(pipeline_id, reporter);

        let mut slots: Vec<Option<TaskInstance>> = tasks.into_iter().map(Some).collect();
        let mut all_succeeded = true;
        for level in levels {
            let wave: Vec<DispatchedTask> = level
                .into_iter()
                .filter_map(|index| slots[index].take())
                .map(|task| {
                    let ctx =
                        TaskContext::new(pipeline_id, run_id, task.id(), Arc::clone(&self.store));
                    DispatchedTask {
                        task,
                        ctx,
                        input: input.clone(),
                    }
                })
                .collect();

            if !self.dispatcher.dispatch(wave, reporter).await {
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
