// Memory Reporter
// Durable-persistence analog keeping one run's status trail in memory

use crate::reporters::Reporter;
use crate::status::Status;

use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// One persisted status transition.
///
/// Mirrors the record shape a database-backed reporter would keep; a task's
/// duration derives from its RUNNING record to its terminal record.
#[derive(Debug, Clone)]
pub struct StatusRecord {
    pub pipeline_id: Option<String>,
    pub task_id: Option<String>,
    pub run_id: String,
    pub status: Status,
    pub message: String,
    pub recorded_at: SystemTime,
}

/// Reporter that records transitions for one run, queryable by run id.
///
/// Doubles as the assertion sink in tests: the full trail is available in
/// report order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    run_id: String,
    records: Mutex<Vec<StatusRecord>>,
}

impl MemoryReporter {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            records: Mutex::new(Vec::new()),
        }
    }

    /// All records in report order.
    pub fn records(&self) -> Vec<StatusRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Records correlated with the given run id.
    pub fn records_for_run(&self, run_id: &str) -> Vec<StatusRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.run_id == run_id)
            .collect()
    }

    /// The status trail of a single task, in report order.
    pub fn task_trail(&self, task_id: &str) -> Vec<(Status, String)> {
        self.records()
            .into_iter()
            .filter(|r| r.task_id.as_deref() == Some(task_id))
            .map(|r| (r.status, r.message))
            .collect()
    }

    /// The status trail of a single pipeline, in report order.
    pub fn pipeline_trail(&self, pipeline_id: &str) -> Vec<(Status, String)> {
        self.records()
            .into_iter()
            .filter(|r| r.pipeline_id.as_deref() == Some(pipeline_id))
            .map(|r| (r.status, r.message))
            .collect()
    }

    /// Time between a task's RUNNING record and its terminal record.
    pub fn task_duration(&self, task_id: &str) -> Option<Duration> {
        let records = self.records.lock().unwrap();
        let started = records
            .iter()
            .find(|r| r.task_id.as_deref() == Some(task_id) && r.status == Status::Running)?;
        let completed = records
            .iter()
            .find(|r| r.task_id.as_deref() == Some(task_id) && r.status.is_terminal())?;
        completed.recorded_at.duration_since(started.recorded_at).ok()
    }
}

impl Reporter for MemoryReporter {
    fn report(
        &self,
        pipeline_id: Option<&str>,
        task_id: Option<&str>,
        status: Status,
        message: &str,
    ) {
        let mut records = self.records.lock().unwrap();
        records.push(StatusRecord {
            pipeline_id: pipeline_id.map(str::to_string),
            task_id: task_id.map(str::to_string),
            run_id: self.run_id.clone(),
            status,
            message: message.to_string(),
            recorded_at: SystemTime::now(),
        });
    }
}
