// src/dag/mod.rs

//! Unit graph, shared store and scheduling.
//!
//! - [`cancel`] is the cooperative cancellation flag checked between units.
//! - [`unit`] holds the step units and the executor seam.
//! - [`store`] is the write-once store units read from.
//! - [`graph`] is an adjacency view with a topological sort.
//! - [`validate`] checks a unit set before a production run.
//! - [`scheduler`] repeatedly runs the ready generation until done.
//! - [`scheduler_step`] defines the result type for manual stepping.

pub mod cancel;
pub mod graph;
pub mod scheduler;
pub mod scheduler_step;
pub mod store;
pub mod unit;
pub mod validate;

pub use cancel::CancelToken;
pub use graph::UnitGraph;
pub use scheduler::{Scheduler, SchedulerOptions};
pub use scheduler_step::SchedulerStep;
pub use store::{RAW_INPUT_KEY, SharedStore, UnitOutput};
pub use unit::{StepUnit, UnitExecutor, default_units};
pub use validate::validate_units;
