// Task Context
// Run-scoped identity and shared-store access handed to task bodies

use crate::store::TaskStore;

use serde_json::Value;
use std::sync::Arc;

/// Context a task body runs with.
///
/// Carries the identifiers correlating this execution and a handle to the
/// shared key-value store. Cheap to clone; clones address the same store.
#[derive(Clone)]
pub struct TaskContext {
    pipeline_id: String,
    run_id: String,
    task_id: String,
    store: Arc<dyn TaskStore>,
}

impl TaskContext {
    pub fn new(
        pipeline_id: impl Into<String>,
        run_id: impl Into<String>,
        task_id: impl Into<String>,
        store: Arc<dyn TaskStore>,
    ) -> Self {
        Self {
            pipeline_id: pipeline_id.into(),
            run_id: run_id.into(),
            task_id: task_id.into(),
            store,
        }
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Upsert a value for downstream tasks in the same run.
    pub fn set(&self, key: &str, value: Value) {
        self.store.set(&self.pipeline_id, &self.run_id, key, value);
    }

    /// Read a value written earlier in the same run.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.store.get(&self.pipeline_id, &self.run_id, key)
    }
}

impl std::fmt::Debug for TaskContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskContext")
            .field("pipeline_id", &self.pipeline_id)
            .field("run_id", &self.run_id)
            .field("task_id", &self.task_id)
            .finish()
    }
}
