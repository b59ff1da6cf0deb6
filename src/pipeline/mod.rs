// Pipeline Module
// Pipeline definitions, config cleaning and the dependency graph

pub mod graph;
pub mod models;

pub use graph::{GraphError, GraphErrorKind, TaskGraph};
pub use models::{Pipeline, PipelineConfigEntry};
