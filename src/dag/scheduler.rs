// src/dag/scheduler.rs

use std::time::Duration;

use futures::future::try_join_all;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::dag::cancel::CancelToken;
use crate::dag::scheduler_step::SchedulerStep;
use crate::dag::store::{SharedStore, UnitOutput};
use crate::dag::unit::{StepUnit, UnitExecutor};
use crate::dag::validate::validate_units;
use crate::errors::{ContentError, Result};
use crate::types::{ExecutionMode, UnitId, UnitStatus};

/// Knobs that change how a generation is executed, never which units run.
#[derive(Debug, Clone, Default)]
pub struct SchedulerOptions {
    pub mode: ExecutionMode,
    /// Pause after a completion-backed unit when more units remain.
    pub unit_delay: Duration,
}

/// Scheduler holds the units plus the mutable per-run state.
///
/// It is responsible for:
/// - computing the ready set from the completed set
/// - running each ready generation through a [`UnitExecutor`]
/// - writing outputs to the store and moving unit statuses forward
/// - reporting a deadlock when nothing is ready but the run is not done
#[derive(Debug)]
pub struct Scheduler {
    units: Vec<StepUnit>,
    options: SchedulerOptions,
    /// Completed unit ids in completion order.
    completed: Vec<UnitId>,
    store: SharedStore,
    run_counter: u64,
}

impl Scheduler {
    /// Construct a scheduler without checking the unit graph.
    ///
    /// A malformed graph surfaces at run time as a deadlock or a contract
    /// violation. Use [`Scheduler::validated`] for production runs.
    pub fn new(units: Vec<StepUnit>, options: SchedulerOptions) -> Self {
        Self {
            units,
            options,
            completed: Vec::new(),
            store: SharedStore::default(),
            run_counter: 0,
        }
    }

    /// Construct a scheduler after [`validate_units`] accepts the graph.
    pub fn validated(units: Vec<StepUnit>, options: SchedulerOptions) -> Result<Self> {
        validate_units(&units)?;
        Ok(Self::new(units, options))
    }

    pub fn units(&self) -> &[StepUnit] {
        &self.units
    }

    pub fn options(&self) -> &SchedulerOptions {
        &self.options
    }

    pub fn completed(&self) -> &[UnitId] {
        &self.completed
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn run_count(&self) -> u64 {
        self.run_counter
    }

    /// Units not yet in `completed` whose dependencies all are, in
    /// declaration order.
    pub fn ready_units(&self, completed: &[UnitId]) -> Vec<UnitId> {
        self.units
            .iter()
            .filter(|u| !completed.contains(&u.id()) && u.can_execute(completed))
            .map(StepUnit::id)
            .collect()
    }

    pub fn is_finished(&self) -> bool {
        self.units.iter().all(|u| self.completed.contains(&u.id()))
    }

    /// Status of every unit in declaration order. Diagnostic only.
    pub fn status_snapshot(&self) -> Vec<(UnitId, UnitStatus)> {
        self.units.iter().map(|u| (u.id(), u.status())).collect()
    }

    /// Reset per-run state and seed the store with `raw_input`.
    pub fn begin_run(&mut self, raw_input: Value) {
        self.run_counter += 1;
        self.completed.clear();
        self.store = SharedStore::new(raw_input);
        for unit in self.units.iter_mut() {
            unit.reset();
        }
        debug!(run_id = self.run_counter, "scheduler: starting new run");
    }

    /// Execute one ready generation.
    ///
    /// Returns immediately with `run_finished = true` if every unit is
    /// already complete.
    pub async fn step(
        &mut self,
        executor: &dyn UnitExecutor,
        cancel: &CancelToken,
    ) -> Result<SchedulerStep> {
        if self.is_finished() {
            return Ok(SchedulerStep {
                executed: Vec::new(),
                run_finished: true,
            });
        }

        let ready = self.ready_units(&self.completed);
        if ready.is_empty() {
            let pending: Vec<UnitId> = self
                .units
                .iter()
                .map(StepUnit::id)
                .filter(|id| !self.completed.contains(id))
                .collect();
            warn!(
                completed = ?self.completed,
                pending = ?pending,
                "scheduler: no unit is ready but the run is incomplete"
            );
            return Err(ContentError::SchedulingDeadlock {
                completed: self.completed.clone(),
                pending,
            });
        }

        debug!(run_id = self.run_counter, ?ready, "scheduler: ready generation");

        match self.options.mode {
            ExecutionMode::Sequential => self.run_sequential(&ready, executor, cancel).await?,
            ExecutionMode::Concurrent => self.run_concurrent(&ready, executor, cancel).await?,
        }

        let run_finished = self.is_finished();
        if run_finished {
            info!(run_id = self.run_counter, "scheduler: all units completed");
        }

        Ok(SchedulerStep {
            executed: ready,
            run_finished,
        })
    }

    /// Run every unit to completion starting from a fresh store.
    ///
    /// Returns a copy of the final store; the scheduler keeps its own for
    /// inspection until the next run.
    pub async fn run(
        &mut self,
        raw_input: Value,
        executor: &dyn UnitExecutor,
        cancel: &CancelToken,
    ) -> Result<SharedStore> {
        self.begin_run(raw_input);
        loop {
            let step = self.step(executor, cancel).await?;
            if step.run_finished {
                break;
            }
        }
        Ok(self.store.clone())
    }

    async fn run_sequential(
        &mut self,
        ready: &[UnitId],
        executor: &dyn UnitExecutor,
        cancel: &CancelToken,
    ) -> Result<()> {
        for &id in ready {
            check_cancelled(cancel, id)?;

            self.set_running(id);
            info!(unit = %id, "unit started");
            let output = executor.execute(id, &self.store).await?;
            self.record(id, output)?;

            if id.uses_completion() {
                self.pause_between_units().await;
            }
        }
        Ok(())
    }

    /// Run a whole generation at once against the store as it was before
    /// the generation started. Outputs are recorded only after every unit
    /// has returned.
    async fn run_concurrent(
        &mut self,
        ready: &[UnitId],
        executor: &dyn UnitExecutor,
        cancel: &CancelToken,
    ) -> Result<()> {
        if let Some(&first) = ready.first() {
            check_cancelled(cancel, first)?;
        }

        for &id in ready {
            self.set_running(id);
            info!(unit = %id, "unit started");
        }

        let snapshot = &self.store;
        let outputs = try_join_all(ready.iter().map(|&id| executor.execute(id, snapshot))).await?;

        for (&id, output) in ready.iter().zip(outputs) {
            self.record(id, output)?;
        }

        if ready.iter().any(|id| id.uses_completion()) {
            self.pause_between_units().await;
        }
        Ok(())
    }

    fn set_running(&mut self, id: UnitId) {
        if let Some(unit) = self.units.iter_mut().find(|u| u.id() == id) {
            unit.mark_running();
        }
    }

    fn record(&mut self, id: UnitId, output: UnitOutput) -> Result<()> {
        self.store.insert(id, output.clone())?;
        if let Some(unit) = self.units.iter_mut().find(|u| u.id() == id) {
            unit.mark_completed(output);
        }
        self.completed.push(id);
        info!(unit = %id, "unit completed");
        Ok(())
    }

    async fn pause_between_units(&self) {
        let delay = self.options.unit_delay;
        if delay.is_zero() || self.is_finished() {
            return;
        }
        debug!(wait_secs = delay.as_secs_f64(), "scheduler: pausing between units");
        tokio::time::sleep(delay).await;
    }
}

fn check_cancelled(cancel: &CancelToken, next: UnitId) -> Result<()> {
    if cancel.is_cancelled() {
        warn!(unit = %next, "run cancelled before unit started");
        return Err(ContentError::Cancelled);
    }
    Ok(())
}
