// Task Definitions
// The author-facing task trait and its registrable definition

use crate::error::RunError;
use crate::schema::Schema;
use crate::tasks::context::TaskContext;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A unit of work.
///
/// Implementations receive the cleaned input payload (validated against the
/// definition's input schema, if one is declared) and report failure by
/// returning an error; the engine maps it onto a RUNTIME_ERROR transition.
/// Panics inside `run` are caught at the task start boundary and reported
/// the same way.
#[async_trait]
pub trait Task: Send + Sync {
    async fn run(&self, ctx: &TaskContext, input: Option<&Value>) -> Result<(), RunError>;
}

type TaskFactory = Box<dyn Fn(&Map<String, Value>) -> Arc<dyn Task> + Send + Sync>;

/// A registrable task: name, schemas and a factory for bound instances.
///
/// Definitions are created once at process start and registered with a
/// [`TaskRegistry`](crate::registry::TaskRegistry). The factory receives the
/// schema-cleaned static config and builds the object whose `run` body
/// executes per pipeline run.
pub struct TaskDefinition {
    name: String,
    config_schema: Schema,
    input_schema: Option<Schema>,
    factory: TaskFactory,
}

impl TaskDefinition {
    pub fn new(
        name: impl Into<String>,
        factory: impl Fn(&Map<String, Value>) -> Arc<dyn Task> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            config_schema: Schema::new(),
            input_schema: None,
            factory: Box::new(factory),
        }
    }

    /// Declare the static config shape (empty schema by default).
    pub fn with_config_schema(mut self, schema: Schema) -> Self {
        self.config_schema = schema;
        self
    }

    /// Declare the runtime input shape. Tasks without one reject any payload.
    pub fn with_input_schema(mut self, schema: Schema) -> Self {
        self.input_schema = Some(schema);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config_schema(&self) -> &Schema {
        &self.config_schema
    }

    pub fn input_schema(&self) -> Option<&Schema> {
        self.input_schema.as_ref()
    }

    pub(crate) fn build(&self, config: &Map<String, Value>) -> Arc<dyn Task> {
        (self.factory)(config)
    }
}

impl std::fmt::Debug for TaskDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskDefinition")
            .field("name", &self.name)
            .field("config_schema", &self.config_schema)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Derived registration name for a task type, used when no explicit name is
/// given: the fully qualified type path, the closest analog of the
/// module-qualified class names task authors are used to.
pub fn default_task_name<T: Task>() -> String {
    std::any::type_name::<T>().to_string()
}
