// Pipeline Registry
// Directory of registered pipelines, the query surface a triggering layer uses

use crate::error::RegistryError;
use crate::pipeline::Pipeline;

use std::collections::HashMap;

/// Directory mapping a pipeline's id to its definition.
///
/// Pipeline identity follows the same uniqueness rule as task identity:
/// duplicate registration is a fatal error, never a silent overwrite.
#[derive(Debug, Default)]
pub struct PipelineRegistry {
    pipelines: HashMap<String, Pipeline>,
}

impl PipelineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, pipeline: Pipeline) -> Result<(), RegistryError> {
        let id = pipeline.id.clone();
        if self.pipelines.contains_key(&id) {
            return Err(RegistryError::DuplicatePipeline(id));
        }

        tracing::debug!(pipeline = %id, "registering pipeline");
        self.pipelines.insert(id, pipeline);
        Ok(())
    }

    /// Resolve a pipeline by id.
    pub fn get(&self, id: &str) -> Option<&Pipeline> {
        self.pipelines.get(id)
    }

    /// Registered pipeline ids.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.pipelines.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// All registered pipelines.
    pub fn pipelines(&self) -> impl Iterator<Item = &Pipeline> {
        self.pipelines.values()
    }

    /// Clear all registrations. Reserved for test isolation.
    pub fn reset(&mut self) {
        self.pipelines.clear();
    }
}
