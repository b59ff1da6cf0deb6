// Task Registry
// Name-to-definition directory, the only place tasks get config-validated

use crate::error::RegistryError;
use crate::reporters::Reporter;
use crate::schema::render_errors;
use crate::status::Status;
use crate::tasks::{TaskDefinition, TaskInstance};

use serde_json::Value;
use std::collections::HashMap;

/// Directory mapping a task's registered name to its definition.
///
/// Constructed once at startup and injected into consumers; never ambient
/// global state. Loading reports failures through the reporter channel so a
/// pipeline can enumerate every failing entry before deciding whether to
/// proceed.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: HashMap<String, TaskDefinition>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task definition under its name.
    ///
    /// A second registration under an already-used name fails and leaves the
    /// first registration authoritative.
    pub fn register(&mut self, definition: TaskDefinition) -> Result<(), RegistryError> {
        let name = definition.name().to_string();
        if self.tasks.contains_key(&name) {
            return Err(RegistryError::DuplicateTask(name));
        }

        tracing::debug!(task = %name, "registering task");
        self.tasks.insert(name, definition);
        Ok(())
    }

    /// Load a bound task instance for one pipeline entry.
    ///
    /// An unregistered name or a config failing the definition's schema is
    /// reported as CONFIG_ERROR against the entry id and yields `None`;
    /// neither is raised to the caller.
    pub fn load(
        &self,
        name: &str,
        task_id: &str,
        raw_config: &Value,
        parents: &[String],
        reporter: &dyn Reporter,
    ) -> Option<TaskInstance> {
        let definition = match self.tasks.get(name) {
            Some(definition) => definition,
            None => {
                reporter.report_task(
                    task_id,
                    Status::ConfigError,
                    &format!("No task named {name} is registered"),
                );
                return None;
            }
        };

        let cleaned = match definition.config_schema().validate(raw_config) {
            Ok(cleaned) => cleaned,
            Err(errors) => {
                reporter.report_task(task_id, Status::ConfigError, &render_errors(&errors));
                return None;
            }
        };

        let task = definition.build(&cleaned);
        Some(TaskInstance::new(
            task_id,
            name,
            parents.to_vec(),
            cleaned,
            definition.input_schema().cloned(),
            task,
        ))
    }

    /// Registered task names, for a triggering layer to enumerate.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tasks.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Clear all registrations. Reserved for test isolation.
    pub fn reset(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunError;
    use crate::reporters::MemoryReporter;
    use crate::schema::{FieldKind, Schema};
    use crate::tasks::{Task, TaskContext};

    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;

    struct Noop;

    #[async_trait]
    impl Task for Noop {
        async fn run(&self, _ctx: &TaskContext, _input: Option<&Value>) -> Result<(), RunError> {
            Ok(())
        }
    }

    fn definition(name: &str) -> TaskDefinition {
        TaskDefinition::new(name, |_config| Arc::new(Noop))
            .with_config_schema(Schema::new().field("value", FieldKind::Integer))
    }

    #[test]
    fn test_duplicate_registration_fails_and_keeps_the_first() {
        let mut registry = TaskRegistry::new();
        registry.register(definition("demo.Echo")).unwrap();

        let err = registry.register(definition("demo.Echo")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTask("demo.Echo".to_string()));
        assert_eq!(registry.names(), vec!["demo.Echo"]);
    }

    #[test]
    fn test_load_unregistered_name_reports_config_error() {
        let registry = TaskRegistry::new();
        let reporter = MemoryReporter::new("run-1");

        let loaded = registry.load("demo.Missing", "a", &json!({}), &[], &reporter);

        assert!(loaded.is_none());
        assert_eq!(
            reporter.task_trail("a"),
            vec![(
                Status::ConfigError,
                "No task named demo.Missing is registered".to_string()
            )]
        );
    }

    #[test]
    fn test_load_with_invalid_config_reports_config_error() {
        let mut registry = TaskRegistry::new();
        registry.register(definition("demo.Echo")).unwrap();
        let reporter = MemoryReporter::new("run-1");

        let loaded = registry.load("demo.Echo", "a", &json!({"value": "foo"}), &[], &reporter);

        assert!(loaded.is_none());
        assert_eq!(
            reporter.task_trail("a"),
            vec![(
                Status::ConfigError,
                "value: expected an integer, found a string".to_string()
            )]
        );
    }

    #[test]
    fn test_load_with_valid_config_binds_an_instance() {
        let mut registry = TaskRegistry::new();
        registry.register(definition("demo.Echo")).unwrap();
        let reporter = MemoryReporter::new("run-1");

        let loaded = registry
            .load(
                "demo.Echo",
                "a",
                &json!({"value": 1}),
                &["b".to_string()],
                &reporter,
            )
            .unwrap();

        assert_eq!(loaded.id(), "a");
        assert_eq!(loaded.name(), "demo.Echo");
        assert_eq!(loaded.parents(), ["b".to_string()]);
        assert_eq!(loaded.config()["value"], json!(1));
        assert!(reporter.records().is_empty());
    }

    #[test]
    fn test_reset_clears_registrations() {
        let mut registry = TaskRegistry::new();
        registry.register(definition("demo.Echo")).unwrap();
        registry.reset();

        assert!(registry.names().is_empty());
        assert!(registry.register(definition("demo.Echo")).is_ok());
    }
}
