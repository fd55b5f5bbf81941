use std::collections::HashSet;

use contentdag::content::sample_input;
use contentdag::dag::{CancelToken, Scheduler, StepUnit, default_units};
use contentdag::types::{ExecutionMode, UnitId, UnitStatus};
use contentdag_test_utils::builders::options;
use contentdag_test_utils::fake_executor::FakeExecutor;
use proptest::prelude::*;

// Random acyclic unit graphs over the five ids.
// A random declaration order is drawn first; each unit may only depend on
// units declared before it, which keeps every graph acyclic.
fn unit_graph_strategy() -> impl Strategy<Value = Vec<StepUnit>> {
    let order = Just(UnitId::ALL.to_vec()).prop_shuffle();
    let raw_deps = proptest::collection::vec(proptest::collection::vec(any::<usize>(), 0..4), 5);

    (order, raw_deps).prop_map(|(order, raw_deps)| {
        order
            .iter()
            .enumerate()
            .zip(raw_deps)
            .map(|((i, id), potential)| {
                let deps: HashSet<UnitId> = if i == 0 {
                    HashSet::new()
                } else {
                    potential.into_iter().map(|d| order[d % i]).collect()
                };
                StepUnit::with_dependencies(*id, deps)
            })
            .collect()
    })
}

fn mode_strategy() -> impl Strategy<Value = ExecutionMode> {
    prop_oneof![Just(ExecutionMode::Sequential), Just(ExecutionMode::Concurrent)]
}

fn run_to_completion(
    units: Vec<StepUnit>,
    mode: ExecutionMode,
) -> (Scheduler, FakeExecutor) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");

    let mut scheduler = Scheduler::validated(units, options(mode)).expect("generated graph is valid");
    let executor = FakeExecutor::new();
    runtime
        .block_on(scheduler.run(sample_input(), &executor, &CancelToken::new()))
        .expect("acyclic graph runs to completion");
    (scheduler, executor)
}

proptest! {
    #[test]
    fn every_acyclic_graph_terminates_in_dependency_order(
        units in unit_graph_strategy(),
        mode in mode_strategy(),
    ) {
        let declared: Vec<(UnitId, Vec<UnitId>)> = units
            .iter()
            .map(|u| (u.id(), u.dependencies().to_vec()))
            .collect();

        let (scheduler, executor) = run_to_completion(units, mode);
        let completed = scheduler.completed();

        // Each unit runs exactly once.
        prop_assert_eq!(completed.len(), declared.len());
        let unique: HashSet<_> = completed.iter().collect();
        prop_assert_eq!(unique.len(), declared.len());
        prop_assert_eq!(executor.executed().len(), declared.len());

        // A unit completes only after all of its dependencies.
        for (id, deps) in &declared {
            let pos = completed.iter().position(|u| u == id).unwrap();
            for dep in deps {
                let dep_pos = completed.iter().position(|u| u == dep).unwrap();
                prop_assert!(dep_pos < pos, "{} completed before its dependency {}", id, dep);
            }
        }

        prop_assert!(scheduler.is_finished());
        prop_assert!(scheduler
            .status_snapshot()
            .iter()
            .all(|(_, s)| *s == UnitStatus::Completed));
    }

    #[test]
    fn ready_set_never_contains_completed_or_blocked_units(
        units in unit_graph_strategy(),
        done in proptest::collection::vec(any::<bool>(), 5),
    ) {
        let scheduler = Scheduler::new(units.clone(), options(ExecutionMode::Sequential));
        let completed: Vec<UnitId> = units
            .iter()
            .zip(done)
            .filter(|(_, d)| *d)
            .map(|(u, _)| u.id())
            .collect();

        for id in scheduler.ready_units(&completed) {
            prop_assert!(!completed.contains(&id));
            let unit = units.iter().find(|u| u.id() == id).unwrap();
            prop_assert!(unit.dependencies().iter().all(|d| completed.contains(d)));
        }
    }
}

#[test]
fn default_graph_runs_parser_first_and_faq_after_questions() {
    for mode in [ExecutionMode::Sequential, ExecutionMode::Concurrent] {
        let (scheduler, _) = run_to_completion(default_units(), mode);
        let completed = scheduler.completed();

        assert_eq!(completed[0], UnitId::Parser);
        let pos = |id| completed.iter().position(|u| *u == id).unwrap();
        assert!(pos(UnitId::Questions) < pos(UnitId::Faq));
        assert_eq!(completed.len(), 5);
    }
}
