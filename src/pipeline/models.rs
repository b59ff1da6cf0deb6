// Pipeline Models
// Ordered task config entries, config cleaning and the run entrypoint

use crate::pipeline::graph::TaskGraph;
use crate::registry::TaskRegistry;
use crate::reporters::Reporter;
use crate::runners::Runner;
use crate::status::Status;
use crate::tasks::TaskInstance;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One task's configuration within a pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfigEntry {
    /// Unique within the pipeline.
    pub id: String,
    /// Registered task name this entry is loaded from.
    pub task: String,
    /// Static, author-supplied config validated against the task's schema.
    #[serde(default)]
    pub config: Value,
    /// Entry ids that must finish before this one starts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
}

impl PipelineConfigEntry {
    pub fn new(id: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            task: task.into(),
            config: Value::Object(Default::default()),
            parents: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    pub fn with_parents(mut self, parents: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }
}

/// A named, ordered collection of task configurations with dependency
/// edges. The entry order is the declaration order the scheduler uses to
/// break ties between equally eligible tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub title: String,
    pub entries: Vec<PipelineConfigEntry>,
}

impl Pipeline {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        entries: Vec<PipelineConfigEntry>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            entries,
        }
    }

    /// Load every entry through the registry, separating successes from
    /// failures.
    ///
    /// Entries with unregistered names, invalid configs or duplicated ids
    /// report CONFIG_ERROR, as do entries whose parents reference ids
    /// outside the pipeline; a parent cycle reports CONFIG_ERROR against
    /// the pipeline itself. Any failure cancels every successfully loaded
    /// entry and yields `None`, and the runner must never start. When
    /// everything loads,
    /// each task is reported PENDING and the cleaned set is returned in
    /// declaration order.
    pub fn clean_tasks(
        &self,
        registry: &TaskRegistry,
        reporter: &dyn Reporter,
    ) -> Option<Vec<TaskInstance>> {
        let mut loaded: Vec<Option<TaskInstance>> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            loaded.push(self.clean_entry(entry, registry, reporter));
        }

        let mut failed = loaded.iter().any(Option::is_none);
        let tasks: Vec<TaskInstance> = loaded.into_iter().flatten().collect();

        // A cycle is only detectable once every entry resolved.
        if !failed && tasks.len() == self.entries.len() {
            if let Err(err) = TaskGraph::build(&tasks) {
                reporter.report_pipeline(&self.id, Status::ConfigError, &err.message);
                failed = true;
            }
        }

        if failed {
            for task in &tasks {
                reporter.report_task(
                    task.id(),
                    Status::Cancelled,
                    "Tasks cancelled due to an error in the pipeline config",
                );
            }
            return None;
        }

        for task in &tasks {
            reporter.report_task(task.id(), Status::Pending, "Task is waiting to start");
        }
        Some(tasks)
    }

    fn clean_entry(
        &self,
        entry: &PipelineConfigEntry,
        registry: &TaskRegistry,
        reporter: &dyn Reporter,
    ) -> Option<TaskInstance> {
        let occurrences = self
            .entries
            .iter()
            .filter(|other| other.id == entry.id)
            .count();
        if occurrences > 1 {
            reporter.report_task(
                &entry.id,
                Status::ConfigError,
                &format!("Multiple tasks in the pipeline have the id {}", entry.id),
            );
            return None;
        }

        let task = registry.load(&entry.task, &entry.id, &entry.config, &entry.parents, reporter)?;

        let known = |parent: &String| {
            self.entries
                .iter()
                .any(|other| other.id != entry.id && other.id == *parent)
        };
        if !entry.parents.iter().all(known) {
            reporter.report_task(
                &entry.id,
                Status::ConfigError,
                "One or more of the parent ids are not in the pipeline",
            );
            return None;
        }

        Some(task)
    }

    /// Validate and run the pipeline.
    ///
    /// Reports the pipeline PENDING, cleans the task set and hands it to the
    /// runner. Returns the runner's aggregate result, or false without
    /// touching the runner when cleaning failed. Per-task outcomes are only
    /// visible through the reporter's trail.
    pub async fn start(
        &self,
        run_id: &str,
        input: Option<&Value>,
        registry: &TaskRegistry,
        runner: &dyn Runner,
        reporter: &dyn Reporter,
    ) -> bool {
        reporter.report_pipeline(&self.id, Status::Pending, "Pipeline is waiting to start");

        let Some(tasks) = self.clean_tasks(registry, reporter) else {
            return false;
        };

        runner
            .start(&self.id, run_id, tasks, input.cloned(), reporter)
            .await
    }
}
