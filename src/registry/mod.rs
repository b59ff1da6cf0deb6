// Registry Module
// Explicit, injectable directories for task and pipeline definitions

pub mod pipelines;
pub mod tasks;

pub use pipelines::PipelineRegistry;
pub use tasks::TaskRegistry;
