// Pipeline Engine Library
// DAG-based task orchestration with schema-validated config and input

//! A pipeline task-orchestration engine.
//!
//! Tasks are registered once at process start with a config schema and an
//! optional input schema; pipelines are ordered collections of task
//! configurations with parent dependency edges. Starting a pipeline
//! validates every entry, derives a dependency-respecting execution order
//! and hands the cleaned task set to a pluggable [`Runner`]; every status
//! transition flows through a pluggable [`Reporter`].
//!
//! ```no_run
//! use pipeline_engine::{
//!     EagerRunner, FieldKind, LoggingReporter, Pipeline, PipelineConfigEntry, RunError, Schema,
//!     Task, TaskContext, TaskDefinition, TaskRegistry,
//! };
//! use async_trait::async_trait;
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl Task for Echo {
//!     async fn run(&self, _ctx: &TaskContext, _input: Option<&Value>) -> Result<(), RunError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut registry = TaskRegistry::new();
//!     registry
//!         .register(
//!             TaskDefinition::new("demo.Echo", |_config| Arc::new(Echo))
//!                 .with_config_schema(Schema::new().field("message", FieldKind::String)),
//!         )
//!         .unwrap();
//!
//!     let pipeline = Pipeline::new(
//!         "demo.Pipeline",
//!         "Demo",
//!         vec![
//!             PipelineConfigEntry::new("first", "demo.Echo")
//!                 .with_config(json!({"message": "hello"})),
//!             PipelineConfigEntry::new("second", "demo.Echo")
//!                 .with_config(json!({"message": "world"}))
//!                 .with_parents(["first"]),
//!         ],
//!     );
//!
//!     pipeline
//!         .start("run-1", None, &registry, &EagerRunner::new(), &LoggingReporter::new())
//!         .await;
//! }
//! ```

pub mod error;
pub mod pipeline;
pub mod registry;
pub mod reporters;
pub mod runners;
pub mod schema;
pub mod status;
pub mod store;
pub mod tasks;

// Re-export commonly used types
pub use error::{RegistryError, RunError};

pub use status::Status;

pub use schema::{FieldError, FieldKind, FieldSpec, Schema};

pub use tasks::{default_task_name, Task, TaskContext, TaskDefinition, TaskInstance};

pub use registry::{PipelineRegistry, TaskRegistry};

pub use pipeline::{GraphError, GraphErrorKind, Pipeline, PipelineConfigEntry, TaskGraph};

pub use runners::{DispatchedTask, DistributedRunner, EagerRunner, Runner, TaskDispatcher};

pub use reporters::{LoggingReporter, MemoryReporter, Reporter, StatusRecord};

pub use store::{InMemoryTaskStore, TaskStore};
