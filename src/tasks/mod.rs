// Tasks Module
// Task definitions, bound instances and the per-task run context

pub mod context;
pub mod definition;
pub mod instance;

pub use context::TaskContext;
pub use definition::{default_task_name, Task, TaskDefinition};
pub use instance::TaskInstance;
