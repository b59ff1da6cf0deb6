// Task Instances
// A config-validated task bound to one pipeline run, with its start lifecycle

use crate::reporters::Reporter;
use crate::schema::{render_errors, Schema};
use crate::status::Status;
use crate::tasks::context::TaskContext;
use crate::tasks::definition::Task;

use serde_json::{Map, Value};
use std::sync::Arc;

/// A task loaded for one run: id, validated config and the run body.
///
/// Instances are produced by [`TaskRegistry::load`](crate::registry::TaskRegistry::load)
/// once the static config passed schema validation, so a config error can
/// never reach [`TaskInstance::start`].
#[derive(Clone)]
pub struct TaskInstance {
    id: String,
    name: String,
    parents: Vec<String>,
    config: Map<String, Value>,
    input_schema: Option<Schema>,
    task: Arc<dyn Task>,
}

impl TaskInstance {
    pub(crate) fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        parents: Vec<String>,
        config: Map<String, Value>,
        input_schema: Option<Schema>,
        task: Arc<dyn Task>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parents,
            config,
            input_schema,
            task,
        }
    }

    /// The entry id, unique within the pipeline.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The registered task name this instance was loaded from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of tasks that must reach a terminal status before this one runs.
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    /// The schema-cleaned static config.
    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    /// Validate the runtime payload and execute the task body.
    ///
    /// Reports VALIDATION_ERROR and skips the body when the payload's
    /// presence or shape mismatches the declared input schema; otherwise
    /// reports RUNNING, runs the body inside a fault boundary and ends with
    /// DONE or RUNTIME_ERROR. Returns whether the task succeeded; failures
    /// never propagate to the caller.
    pub async fn start(
        &self,
        ctx: &TaskContext,
        input: Option<&Value>,
        reporter: &dyn Reporter,
    ) -> bool {
        let cleaned = match self.clean_input(input) {
            Ok(cleaned) => cleaned,
            Err(message) => {
                reporter.report_task(&self.id, Status::ValidationError, &message);
                return false;
            }
        };

        reporter.report_task(&self.id, Status::Running, "Task is running");

        // Run on a separate tokio task so a panicking body surfaces as a
        // JoinError instead of unwinding through the runner.
        let task = Arc::clone(&self.task);
        let ctx = ctx.clone();
        let outcome =
            tokio::spawn(async move { task.run(&ctx, cleaned.as_ref()).await }).await;

        match outcome {
            Ok(Ok(())) => {
                reporter.report_task(&self.id, Status::Done, "Done");
                true
            }
            Ok(Err(err)) => {
                reporter.report_task(&self.id, Status::RuntimeError, &err.to_string());
                false
            }
            Err(join_err) => {
                let message = if join_err.is_panic() {
                    format!("Task panicked: {join_err}")
                } else {
                    join_err.to_string()
                };
                reporter.report_task(&self.id, Status::RuntimeError, &message);
                false
            }
        }
    }

    /// Presence/shape check for the runtime payload.
    ///
    /// A `None` or null payload counts as absent; an empty object is a
    /// provided payload and goes through schema validation.
    fn clean_input(&self, input: Option<&Value>) -> Result<Option<Value>, String> {
        let payload = input.filter(|value| !value.is_null());

        match (&self.input_schema, payload) {
            (Some(_), None) => Err("Input data was not provided when expected".to_string()),
            (None, Some(_)) => Err("Input data was provided when not expected".to_string()),
            (None, None) => Ok(None),
            (Some(schema), Some(payload)) => schema
                .validate(payload)
                .map(|cleaned| Some(Value::Object(cleaned)))
                .map_err(|errors| render_errors(&errors)),
        }
    }
}

impl std::fmt::Debug for TaskInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskInstance")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("parents", &self.parents)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunError;
    use crate::reporters::MemoryReporter;
    use crate::schema::FieldKind;
    use crate::store::InMemoryTaskStore;

    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Recording {
        ran: Arc<AtomicBool>,
        result: Result<(), String>,
    }

    #[async_trait]
    impl Task for Recording {
        async fn run(&self, _ctx: &TaskContext, _input: Option<&Value>) -> Result<(), RunError> {
            self.ran.store(true, Ordering::SeqCst);
            self.result.clone().map_err(RunError::from)
        }
    }

    struct Panicking;

    #[async_trait]
    impl Task for Panicking {
        async fn run(&self, _ctx: &TaskContext, _input: Option<&Value>) -> Result<(), RunError> {
            panic!("unexpected fault");
        }
    }

    fn ctx() -> TaskContext {
        TaskContext::new("pl", "run-1", "a", Arc::new(InMemoryTaskStore::new()))
    }

    fn instance(input_schema: Option<Schema>, task: Arc<dyn Task>) -> TaskInstance {
        TaskInstance::new("a", "demo.Task", Vec::new(), Map::new(), input_schema, task)
    }

    #[tokio::test]
    async fn test_missing_input_reports_validation_error_and_skips_run() {
        let ran = Arc::new(AtomicBool::new(false));
        let task = instance(
            Some(Schema::new().field("value", FieldKind::Integer)),
            Arc::new(Recording {
                ran: ran.clone(),
                result: Ok(()),
            }),
        );
        let reporter = MemoryReporter::new("run-1");

        assert!(!task.start(&ctx(), None, &reporter).await);
        assert_eq!(
            reporter.task_trail("a"),
            vec![(
                Status::ValidationError,
                "Input data was not provided when expected".to_string()
            )]
        );
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_unexpected_input_reports_validation_error_and_skips_run() {
        let ran = Arc::new(AtomicBool::new(false));
        let task = instance(
            None,
            Arc::new(Recording {
                ran: ran.clone(),
                result: Ok(()),
            }),
        );
        let reporter = MemoryReporter::new("run-1");

        assert!(!task.start(&ctx(), Some(&json!({"value": 1})), &reporter).await);
        assert_eq!(
            reporter.task_trail("a"),
            vec![(
                Status::ValidationError,
                "Input data was provided when not expected".to_string()
            )]
        );
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_invalid_input_reports_field_errors() {
        let ran = Arc::new(AtomicBool::new(false));
        let task = instance(
            Some(Schema::new().field("value", FieldKind::Integer)),
            Arc::new(Recording {
                ran: ran.clone(),
                result: Ok(()),
            }),
        );
        let reporter = MemoryReporter::new("run-1");

        assert!(!task.start(&ctx(), Some(&json!({"value": "foo"})), &reporter).await);
        assert_eq!(
            reporter.task_trail("a"),
            vec![(
                Status::ValidationError,
                "value: expected an integer, found a string".to_string()
            )]
        );
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_successful_run_reports_running_then_done() {
        let ran = Arc::new(AtomicBool::new(false));
        let task = instance(
            Some(Schema::new().field("value", FieldKind::Integer)),
            Arc::new(Recording {
                ran: ran.clone(),
                result: Ok(()),
            }),
        );
        let reporter = MemoryReporter::new("run-1");

        assert!(task.start(&ctx(), Some(&json!({"value": 1})), &reporter).await);
        assert_eq!(
            reporter.task_trail("a"),
            vec![
                (Status::Running, "Task is running".to_string()),
                (Status::Done, "Done".to_string()),
            ]
        );
        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_failing_run_reports_runtime_error_with_its_message() {
        let task = instance(
            None,
            Arc::new(Recording {
                ran: Arc::new(AtomicBool::new(false)),
                result: Err("boom".to_string()),
            }),
        );
        let reporter = MemoryReporter::new("run-1");

        // the failure is reported, never raised
        assert!(!task.start(&ctx(), None, &reporter).await);
        assert_eq!(
            reporter.task_trail("a"),
            vec![
                (Status::Running, "Task is running".to_string()),
                (Status::RuntimeError, "boom".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_panicking_run_maps_to_runtime_error() {
        let task = instance(None, Arc::new(Panicking));
        let reporter = MemoryReporter::new("run-1");

        assert!(!task.start(&ctx(), None, &reporter).await);
        let trail = reporter.task_trail("a");
        assert_eq!(trail[0].0, Status::Running);
        assert_eq!(trail[1].0, Status::RuntimeError);
        assert!(trail[1].1.contains("panicked"));
    }

    #[tokio::test]
    async fn test_null_payload_counts_as_absent() {
        let task = instance(
            None,
            Arc::new(Recording {
                ran: Arc::new(AtomicBool::new(false)),
                result: Ok(()),
            }),
        );
        let reporter = MemoryReporter::new("run-1");

        assert!(task.start(&ctx(), Some(&Value::Null), &reporter).await);
    }
}
