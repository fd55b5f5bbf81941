// src/dag/scheduler_step.rs

//! Step-by-step execution result type for the scheduler.

use crate::types::UnitId;

/// Structured result of one scheduler generation.
///
/// Useful for tests that want to step the run manually and make assertions
/// about what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerStep {
    /// Units executed in this generation, in execution order.
    pub executed: Vec<UnitId>,
    /// Whether every unit is now complete.
    pub run_finished: bool,
}
