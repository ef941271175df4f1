use crate::{
    ActionId, SolveError, SolvePhase, SolverConfig, StateKey, ValueIteration, bellman_residual,
};

use super::{TableModel, chain};

fn engine() -> ValueIteration {
    ValueIteration::new(SolverConfig::default()).expect("default config is valid")
}

#[test]
fn chain_converges_to_discounted_goal_value() {
    let model = chain();
    let solution = engine().solve(&model).expect("chain converges");

    assert!((solution.value(StateKey::from(0)) - 0.9).abs() < 1e-9);
    assert!((solution.value(StateKey::from(1)) - 1.0).abs() < 1e-9);
    assert_eq!(solution.value(StateKey::from(2)), 1.0);
    assert_eq!(solution.sweeps(), 3);
    assert_eq!(solution.iterations(), solution.sweeps());

    assert_eq!(solution.policy().action(StateKey::from(0)), Some(ActionId::from(1)));
    assert_eq!(solution.policy().action(StateKey::from(1)), Some(ActionId::from(1)));
    assert_eq!(solution.policy().action(StateKey::from(2)), None);
}

#[test]
fn sweeps_are_synchronous() {
    // With in-place updates state 0 would already see state 1's new value on
    // the first sweep and report 0.9 there.
    let model = chain();
    let mut first = None;
    let _ = engine()
        .solve_with_hook(&model, None, |snapshot| {
            if first.is_none() {
                first = Some(snapshot.values.clone());
            }
        })
        .expect("chain converges");

    let first = first.expect("at least one sweep ran");
    assert_eq!(first, vec![0.0, 1.0, 1.0]);
}

#[test]
fn trace_is_recorded_only_when_requested() {
    let model = chain();
    let quiet = engine().solve(&model).expect("converges");
    assert!(quiet.trace().is_empty());

    let traced = ValueIteration::new(SolverConfig {
        record_trace: true,
        ..SolverConfig::default()
    })
    .expect("valid config")
    .solve(&model)
    .expect("converges");
    assert_eq!(traced.trace().len(), traced.sweeps());
    let last = traced.trace().last().expect("trace is not empty");
    assert!(last.delta < 1e-6);
    assert_eq!(last.policy, vec![Some(1), Some(1), None]);
}

#[test]
fn resolving_from_converged_values_stops_after_one_sweep() {
    let model = chain();
    let solution = engine().solve(&model).expect("converges");
    let again = engine()
        .solve_from(&model, solution.values())
        .expect("warm start converges");

    assert_eq!(again.sweeps(), 1);
    assert_eq!(again.policy(), solution.policy());
    assert!(bellman_residual(&model, again.values(), 0.9) < 1e-6);
}

#[test]
fn hitting_sweep_bound_is_an_error() {
    let model = chain();
    let engine = ValueIteration::new(SolverConfig {
        max_sweeps: 1,
        ..SolverConfig::default()
    })
    .expect("valid config");

    let err = engine.solve(&model).expect_err("one sweep is not enough");
    assert!(matches!(
        err,
        SolveError::NotConverged {
            phase: SolvePhase::ValueIteration,
            limit: 1,
            ..
        }
    ));
}

#[test]
fn warm_start_length_is_checked() {
    let model = chain();
    let err = engine()
        .solve_from(&model, &[0.0])
        .expect_err("length mismatch");
    assert_eq!(
        err,
        SolveError::WarmStartLength {
            expected: 3,
            actual: 1
        }
    );
}

#[test]
fn model_without_actions_is_rejected() {
    let model = TableModel {
        terminal: vec![None, Some(1.0)],
        outcomes: vec![Vec::new(), Vec::new()],
        action_count: 0,
    };
    assert_eq!(engine().solve(&model).expect_err("no actions"), SolveError::NoActions);
}

#[test]
fn terminal_values_never_change() {
    let model = chain();
    let solution = engine()
        .solve_from(&model, &[3.0, -2.0, 99.0])
        .expect("converges");
    assert_eq!(solution.value(StateKey::from(2)), 1.0);
}
