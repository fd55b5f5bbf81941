// src/engine/mod.rs

//! Pipeline runner.
//!
//! Ties together the validated unit graph, the scheduler and a
//! [`UnitExecutor`](crate::dag::UnitExecutor), then collects the three page
//! documents into named output slots and hands them to a sink.
//!
//! - [`outputs`] holds the slots, fingerprints and the all-or-nothing flush.
//! - [`pipeline`] drives one run end to end.

pub mod outputs;
pub mod pipeline;

pub use outputs::{CollectedDocument, OutputSlot, RunOutputs};
pub use pipeline::{Pipeline, RunReport};
