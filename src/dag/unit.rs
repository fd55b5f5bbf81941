// src/dag/unit.rs

use async_trait::async_trait;

use crate::dag::store::{SharedStore, UnitOutput};
use crate::errors::Result;
use crate::types::{UnitId, UnitStatus};

/// A named step with its declared dependencies and per-run state.
///
/// The scheduler owns every `StepUnit` and is the only thing that moves its
/// status forward.
#[derive(Debug, Clone)]
pub struct StepUnit {
    id: UnitId,
    dependencies: Vec<UnitId>,
    status: UnitStatus,
    output: Option<UnitOutput>,
}

impl StepUnit {
    /// Unit with its default dependency set.
    pub fn new(id: UnitId) -> Self {
        Self::with_dependencies(id, id.default_dependencies().iter().copied())
    }

    /// Unit with an explicit dependency set. Duplicates are dropped.
    pub fn with_dependencies(id: UnitId, deps: impl IntoIterator<Item = UnitId>) -> Self {
        let mut dependencies: Vec<UnitId> = Vec::new();
        for dep in deps {
            if !dependencies.contains(&dep) {
                dependencies.push(dep);
            }
        }
        Self {
            id,
            dependencies,
            status: UnitStatus::Pending,
            output: None,
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn dependencies(&self) -> &[UnitId] {
        &self.dependencies
    }

    pub fn status(&self) -> UnitStatus {
        self.status
    }

    pub fn output(&self) -> Option<&UnitOutput> {
        self.output.as_ref()
    }

    /// True iff every dependency is in `completed`.
    pub fn can_execute(&self, completed: &[UnitId]) -> bool {
        self.dependencies.iter().all(|dep| completed.contains(dep))
    }

    pub(crate) fn mark_running(&mut self) {
        self.status = UnitStatus::Running;
    }

    pub(crate) fn mark_completed(&mut self, output: UnitOutput) {
        self.status = UnitStatus::Completed;
        self.output = Some(output);
    }

    pub(crate) fn reset(&mut self) {
        self.status = UnitStatus::Pending;
        self.output = None;
    }
}

/// The five units in declaration order with their default dependencies.
pub fn default_units() -> Vec<StepUnit> {
    UnitId::ALL.iter().copied().map(StepUnit::new).collect()
}

/// Runs the body of a unit against a read-only view of the store.
///
/// Production code uses [`crate::steps::StepRunner`]; tests can swap in
/// their own implementation.
#[async_trait]
pub trait UnitExecutor: Send + Sync {
    async fn execute(&self, unit: UnitId, store: &SharedStore) -> Result<UnitOutput>;
}
