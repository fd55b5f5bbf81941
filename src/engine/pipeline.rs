// src/engine/pipeline.rs

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::dag::{
    CancelToken, Scheduler, SchedulerOptions, StepUnit, UnitExecutor, default_units,
};
use crate::engine::outputs::RunOutputs;
use crate::errors::Result;
use crate::sink::OutputSink;
use crate::types::{UnitId, UnitStatus};

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outputs: RunOutputs,
    /// Unit statuses in declaration order.
    pub statuses: Vec<(UnitId, UnitStatus)>,
    /// Units in the order they completed.
    pub completion_order: Vec<UnitId>,
}

/// One validated unit graph plus the executor that runs its bodies.
///
/// A pipeline can be run any number of times; each run starts from a fresh
/// store.
pub struct Pipeline {
    scheduler: Scheduler,
    executor: Arc<dyn UnitExecutor>,
}

impl Pipeline {
    /// Pipeline over the five default units.
    pub fn new(executor: Arc<dyn UnitExecutor>, options: SchedulerOptions) -> Result<Self> {
        Self::with_units(default_units(), executor, options)
    }

    /// Pipeline over a custom unit set, validated up front.
    pub fn with_units(
        units: Vec<StepUnit>,
        executor: Arc<dyn UnitExecutor>,
        options: SchedulerOptions,
    ) -> Result<Self> {
        let scheduler = Scheduler::validated(units, options)?;
        Ok(Self {
            scheduler,
            executor,
        })
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Run every unit over `raw_input` and collect the page documents.
    pub async fn run(&mut self, raw_input: Value, cancel: &CancelToken) -> Result<RunReport> {
        let store = self
            .scheduler
            .run(raw_input, self.executor.as_ref(), cancel)
            .await?;

        let outputs = RunOutputs::collect(&store)?;
        info!(
            run_id = self.scheduler.run_count(),
            documents = outputs.iter().count(),
            "run finished"
        );

        Ok(RunReport {
            outputs,
            statuses: self.scheduler.status_snapshot(),
            completion_order: self.scheduler.completed().to_vec(),
        })
    }

    /// Run, then flush all three documents to `sink`. Nothing is written if
    /// any step of the run fails.
    pub async fn run_to_sink(
        &mut self,
        raw_input: Value,
        sink: &dyn OutputSink,
        cancel: &CancelToken,
    ) -> Result<RunReport> {
        let report = self.run(raw_input, cancel).await?;
        report.outputs.flush(sink)?;
        Ok(report)
    }
}
