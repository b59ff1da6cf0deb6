// Task Store
// Shared key-value exchange between tasks in the same run

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Key-value store tasks use to pass lightweight data downstream.
///
/// Entries are upserted by (pipeline_id, run_id, key), last writer wins.
/// The engine performs no additional serialization for concurrent writers
/// to the same key; pipeline authors must keep at most one writer per key
/// per run.
pub trait TaskStore: Send + Sync {
    fn set(&self, pipeline_id: &str, run_id: &str, key: &str, value: Value);

    fn get(&self, pipeline_id: &str, run_id: &str, key: &str) -> Option<Value>;
}

/// In-process store suitable for the eager runner and tests.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    entries: Mutex<HashMap<(String, String, String), Value>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for InMemoryTaskStore {
    fn set(&self, pipeline_id: &str, run_id: &str, key: &str, value: Value) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(
            (pipeline_id.to_string(), run_id.to_string(), key.to_string()),
            value,
        );
    }

    fn get(&self, pipeline_id: &str, run_id: &str, key: &str) -> Option<Value> {
        let entries = self.entries.lock().unwrap();
        entries
            .get(&(pipeline_id.to_string(), run_id.to_string(), key.to_string()))
            .cloned()
    }
}
