// Task Graph
// Dependency DAG over a pipeline's tasks and its deterministic ordering

use crate::tasks::TaskInstance;

use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Error type for graph construction
#[derive(Debug, Clone)]
pub struct GraphError {
    pub message: String,
    pub kind: GraphErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphErrorKind {
    /// Circular parent dependency
    CyclicDependency,
    /// Parent id not present in the pipeline
    UnknownDependency,
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for GraphError {}

impl GraphError {
    fn cyclic(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: GraphErrorKind::CyclicDependency,
        }
    }

    fn unknown_dependency(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: GraphErrorKind::UnknownDependency,
        }
    }
}

/// Dependency graph over one pipeline's tasks.
///
/// Each task is a node; each declared parent id is an inbound edge. Built
/// at clean time so a cycle or a dangling parent is rejected before any
/// task runs, and rebuilt by runners to derive their dispatch order.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    ids: Vec<String>,
    parents: Vec<Vec<usize>>,
    order: Vec<usize>,
}

impl TaskGraph {
    /// Build and validate the graph for a set of loaded tasks.
    ///
    /// The slice order is the pipeline's declaration order and is the
    /// authoritative tie-break between simultaneously eligible tasks.
    pub fn build(tasks: &[TaskInstance]) -> Result<Self, GraphError> {
        let ids: Vec<String> = tasks.iter().map(|t| t.id().to_string()).collect();
        let indices: HashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut parents = vec![Vec::new(); tasks.len()];
        let mut children = vec![Vec::new(); tasks.len()];
        for (i, task) in tasks.iter().enumerate() {
            for parent in task.parents() {
                let Some(&p) = indices.get(parent.as_str()) else {
                    return Err(GraphError::unknown_dependency(format!(
                        "Task '{}' references unknown parent '{}'",
                        task.id(),
                        parent
                    )));
                };
                parents[i].push(p);
                children[p].push(i);
            }
        }

        let order = Self::kahn_order(&parents, &children);
        if order.len() != ids.len() {
            let mut unresolved: Vec<&str> = ids
                .iter()
                .enumerate()
                .filter(|(i, _)| !order.contains(i))
                .map(|(_, id)| id.as_str())
                .collect();
            unresolved.sort_unstable();
            return Err(GraphError::cyclic(format!(
                "Circular dependency detected involving: {}",
                unresolved.join(", ")
            )));
        }

        Ok(Self { ids, parents, order })
    }

    // Kahn's algorithm with a FIFO queue seeded in declaration order, so
    // equally eligible tasks keep their declared relative order.
    fn kahn_order(parents: &[Vec<usize>], children: &[Vec<usize>]) -> Vec<usize> {
        let mut in_degree: Vec<usize> = parents.iter().map(Vec::len).collect();

        let mut queue: VecDeque<usize> = (0..parents.len())
            .filter(|&i| in_degree[i] == 0)
            .collect();

        let mut order = Vec::with_capacity(parents.len());
        while let Some(node) = queue.pop_front() {
            order.push(node);
            for &child in &children[node] {
                in_degree[child] -= 1;
                if in_degree[child] == 0 {
                    queue.push_back(child);
                }
            }
        }

        order
    }

    /// Indices into the original task slice, in execution order.
    ///
    /// Every task is placed strictly after all of its parents; among tasks
    /// whose dependencies are satisfied at the same point, declaration order
    /// decides.
    pub fn execution_order(&self) -> &[usize] {
        &self.order
    }

    /// Waves of mutually independent tasks.
    ///
    /// A task's wave is one past its deepest parent's wave; tasks within a
    /// wave share no ancestry path and may execute concurrently once every
    /// earlier wave is terminal. Wave membership keeps declaration order.
    pub fn execution_levels(&self) -> Vec<Vec<usize>> {
        let mut level_of = vec![0usize; self.ids.len()];
        let mut levels: Vec<Vec<usize>> = Vec::new();

        for &node in &self.order {
            let level = self.parents[node]
                .iter()
                .map(|&p| level_of[p] + 1)
                .max()
                .unwrap_or(0);
            level_of[node] = level;

            if level >= levels.len() {
                levels.resize(level + 1, Vec::new());
            }
            levels[level].push(node);
        }

        for level in &mut levels {
            level.sort_unstable();
        }
        levels
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The task id at a node index.
    pub fn id(&self, index: usize) -> &str {
        &self.ids[index]
    }
}
