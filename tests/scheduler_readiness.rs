// tests/scheduler_readiness.rs

use contentdag::content::sample_input;
use contentdag::dag::{CancelToken, Scheduler, StepUnit, UnitGraph, default_units};
use contentdag::errors::ContentError;
use contentdag::types::{ExecutionMode, UnitId, UnitStatus};
use contentdag_test_utils::builders::{options, units};
use contentdag_test_utils::fake_executor::FakeExecutor;
use contentdag_test_utils::{init_tracing, with_timeout};

fn default_scheduler() -> Scheduler {
    Scheduler::new(default_units(), options(ExecutionMode::Sequential))
}

#[test]
fn can_execute_is_pure_subset_check() {
    let faq = StepUnit::new(UnitId::Faq);
    let completed = vec![UnitId::Parser];

    assert!(!faq.can_execute(&completed));
    assert!(!faq.can_execute(&completed));
    assert_eq!(completed, vec![UnitId::Parser]);
    assert_eq!(faq.status(), UnitStatus::Pending);

    assert!(faq.can_execute(&[UnitId::Questions, UnitId::Parser]));
    assert!(StepUnit::new(UnitId::Parser).can_execute(&[]));
}

#[test]
fn ready_set_from_nothing_completed() {
    let scheduler = default_scheduler();
    assert_eq!(scheduler.ready_units(&[]), vec![UnitId::Parser]);
}

#[test]
fn ready_set_after_parser() {
    let scheduler = default_scheduler();
    assert_eq!(
        scheduler.ready_units(&[UnitId::Parser]),
        vec![UnitId::Questions, UnitId::Product, UnitId::Comparison]
    );
}

#[test]
fn ready_set_after_parser_and_questions() {
    let scheduler = default_scheduler();
    assert_eq!(
        scheduler.ready_units(&[UnitId::Parser, UnitId::Questions]),
        vec![UnitId::Product, UnitId::Comparison, UnitId::Faq]
    );
}

#[test]
fn default_graph_has_parser_as_only_root() {
    let graph = UnitGraph::from_units(&default_units());

    assert_eq!(graph.roots(), vec![UnitId::Parser]);
    assert_eq!(
        graph.dependents_of(UnitId::Parser),
        &[UnitId::Questions, UnitId::Product, UnitId::Comparison, UnitId::Faq]
    );
    assert_eq!(graph.dependents_of(UnitId::Questions), &[UnitId::Faq]);

    let order = graph.topological_order().unwrap();
    assert_eq!(order[0], UnitId::Parser);
}

#[test]
fn status_snapshot_is_in_declaration_order() {
    let scheduler = default_scheduler();
    let snapshot = scheduler.status_snapshot();

    let ids: Vec<UnitId> = snapshot.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, UnitId::ALL.to_vec());
    assert!(snapshot.iter().all(|(_, s)| *s == UnitStatus::Pending));
}

#[tokio::test]
async fn manual_stepping_runs_one_generation_at_a_time() {
    init_tracing();
    with_timeout(async {
        let mut scheduler = default_scheduler();
        let executor = FakeExecutor::new();
        let cancel = CancelToken::new();
        scheduler.begin_run(sample_input());

        let first = scheduler.step(&executor, &cancel).await.unwrap();
        assert_eq!(first.executed, vec![UnitId::Parser]);
        assert!(!first.run_finished);

        let second = scheduler.step(&executor, &cancel).await.unwrap();
        assert_eq!(
            second.executed,
            vec![UnitId::Questions, UnitId::Product, UnitId::Comparison]
        );
        assert!(!second.run_finished);

        let third = scheduler.step(&executor, &cancel).await.unwrap();
        assert_eq!(third.executed, vec![UnitId::Faq]);
        assert!(third.run_finished);

        let after = scheduler.step(&executor, &cancel).await.unwrap();
        assert!(after.executed.is_empty());
        assert!(after.run_finished);

        assert!(scheduler
            .status_snapshot()
            .iter()
            .all(|(_, s)| *s == UnitStatus::Completed));
        assert!(scheduler.units().iter().all(|u| u.output().is_some()));
    })
    .await;
}

#[tokio::test]
async fn concurrent_mode_runs_same_generations() {
    with_timeout(async {
        let mut scheduler = Scheduler::new(default_units(), options(ExecutionMode::Concurrent));
        let executor = FakeExecutor::new();
        let store = scheduler
            .run(sample_input(), &executor, &CancelToken::new())
            .await
            .unwrap();

        assert_eq!(store.len(), 5);
        assert_eq!(executor.executed()[0], UnitId::Parser);
        assert_eq!(*executor.executed().last().unwrap(), UnitId::Faq);
    })
    .await;
}

#[tokio::test]
async fn each_run_starts_fresh() {
    with_timeout(async {
        let mut scheduler = default_scheduler();
        let executor = FakeExecutor::new();
        let cancel = CancelToken::new();

        scheduler.run(sample_input(), &executor, &cancel).await.unwrap();
        // A second run would hit write-once violations if the store leaked.
        let store = scheduler.run(sample_input(), &executor, &cancel).await.unwrap();

        assert_eq!(store.len(), 5);
        assert_eq!(scheduler.run_count(), 2);
        assert_eq!(executor.executed().len(), 10);
    })
    .await;
}

#[tokio::test]
async fn cyclic_graph_deadlocks_after_parser() {
    with_timeout(async {
        let cyclic = units(&[
            (UnitId::Parser, &[]),
            (UnitId::Questions, &[UnitId::Parser, UnitId::Faq]),
            (UnitId::Faq, &[UnitId::Questions]),
        ]);
        let mut scheduler = Scheduler::new(cyclic, options(ExecutionMode::Sequential));

        let err = scheduler
            .run(sample_input(), &FakeExecutor::new(), &CancelToken::new())
            .await
            .unwrap_err();

        match err {
            ContentError::SchedulingDeadlock { completed, pending } => {
                assert_eq!(completed, vec![UnitId::Parser]);
                assert_eq!(pending, vec![UnitId::Questions, UnitId::Faq]);
            }
            other => panic!("expected SchedulingDeadlock, got {other:?}"),
        }
    })
    .await;
}

#[tokio::test]
async fn cancelled_token_stops_before_first_unit() {
    with_timeout(async {
        let mut scheduler = default_scheduler();
        let executor = FakeExecutor::new();
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = scheduler.run(sample_input(), &executor, &cancel).await.unwrap_err();

        assert!(matches!(err, ContentError::Cancelled));
        assert!(executor.executed().is_empty());
    })
    .await;
}

#[tokio::test]
async fn failing_unit_stops_the_run() {
    with_timeout(async {
        let mut scheduler = default_scheduler();
        let executor = FakeExecutor::failing_on(UnitId::Product);

        let err = scheduler
            .run(sample_input(), &executor, &CancelToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::GenerationFailure(_)));
        assert_eq!(
            executor.executed(),
            vec![UnitId::Parser, UnitId::Questions, UnitId::Product]
        );
        assert!(!scheduler.completed().contains(&UnitId::Product));
        assert!(!scheduler.completed().contains(&UnitId::Faq));
    })
    .await;
}
