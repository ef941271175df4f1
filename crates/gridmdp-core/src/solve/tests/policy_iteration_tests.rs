use crate::{
    ActionId, PolicyIteration, SolveError, SolvePhase, SolverConfig, StateKey, TabularModel,
    ValueTable,
};

use super::chain;

fn engine() -> PolicyIteration {
    PolicyIteration::new(SolverConfig {
        record_trace: true,
        ..SolverConfig::default()
    })
    .expect("valid config")
}

#[test]
fn chain_policy_stabilizes_after_three_iterations() {
    let model = chain();
    let solution = engine().solve(&model).expect("chain converges");

    assert_eq!(solution.iterations(), 3);
    assert!((solution.value(StateKey::from(0)) - 0.9).abs() < 1e-9);
    assert!((solution.value(StateKey::from(1)) - 1.0).abs() < 1e-9);
    assert_eq!(solution.policy().action(StateKey::from(0)), Some(ActionId::from(1)));
    assert_eq!(solution.policy().action(StateKey::from(1)), Some(ActionId::from(1)));

    let changes: Vec<usize> = solution.trace().iter().map(|s| s.policy_changes).collect();
    assert_eq!(changes, vec![1, 1, 0]);
    let sweeps: usize = solution.trace().iter().map(|s| s.evaluation_sweeps).sum();
    assert_eq!(sweeps, solution.sweeps());
}

#[test]
fn default_seed_policy_is_first_action() {
    let model = chain();
    let policy = engine().initial_policy(&model, None).expect("valid");
    assert_eq!(policy.actions(), &[Some(ActionId::from(0)), Some(ActionId::from(0)), None]);
}

#[test]
fn partial_seed_policy_is_respected_and_completed() {
    let model = chain();
    let partial = [None, Some(ActionId::from(1)), Some(ActionId::from(1))];
    let policy = engine()
        .initial_policy(&model, Some(&partial))
        .expect("valid");
    assert_eq!(policy.actions(), &[Some(ActionId::from(0)), Some(ActionId::from(1)), None]);
}

#[test]
fn seeded_initial_policy_is_reproducible() {
    let model = super::random_model(6, 4, 11);
    let seeded = PolicyIteration::new(SolverConfig {
        initial_policy_seed: Some(99),
        ..SolverConfig::default()
    })
    .expect("valid config");

    let a = seeded.initial_policy(&model, None).expect("valid");
    let b = seeded.initial_policy(&model, None).expect("valid");
    assert_eq!(a, b);
    for state in model.states().filter(|s| !model.is_terminal(*s)) {
        let action = a.action(state).expect("ordinary states get an action");
        assert!(action.index() < model.action_count());
    }
}

#[test]
fn seed_policy_with_unknown_action_is_rejected() {
    let model = chain();
    let partial = [Some(ActionId::from(5)), None, None];
    let err = engine()
        .solve_with_policy(&model, &partial)
        .expect_err("action 5 does not exist");
    assert!(matches!(err, SolveError::InvalidAction { .. }));
}

#[test]
fn seed_policy_length_is_checked() {
    let model = chain();
    let err = engine()
        .solve_with_policy(&model, &[None])
        .expect_err("wrong length");
    assert_eq!(
        err,
        SolveError::PolicyLength {
            expected: 3,
            actual: 1
        }
    );
}

#[test]
fn evaluation_follows_fixed_policy_without_max() {
    let model = chain();
    let engine = engine();
    let policy = engine
        .initial_policy(&model, Some(&[Some(ActionId::from(0)), Some(ActionId::from(1)), None]))
        .expect("valid");
    let mut values = ValueTable::initial(&model);

    let (sweeps, delta) = engine
        .evaluate(&model, &policy, &mut values)
        .expect("evaluation converges");

    assert!(delta < 1e-6);
    assert!(sweeps >= 2);
    // State 0 stays put forever and never earns anything.
    assert_eq!(values.get(StateKey::from(0)), 0.0);
    assert!((values.get(StateKey::from(1)) - 1.0).abs() < 1e-12);
}

#[test]
fn evaluation_bound_is_reported_per_phase() {
    let model = chain();
    let engine = PolicyIteration::new(SolverConfig {
        max_sweeps: 1,
        ..SolverConfig::default()
    })
    .expect("valid config");
    let policy = engine
        .initial_policy(&model, Some(&[Some(ActionId::from(1)), Some(ActionId::from(1)), None]))
        .expect("valid");

    let err = engine.solve_from(&model, &policy, &[0.0, 0.0, 1.0]).expect_err("bound too low");
    assert!(matches!(
        err,
        SolveError::NotConverged {
            phase: SolvePhase::PolicyEvaluation,
            limit: 1,
            ..
        }
    ));
}

#[test]
fn outer_iteration_bound_is_reported() {
    let model = chain();
    let engine = PolicyIteration::new(SolverConfig {
        max_iterations: 1,
        ..SolverConfig::default()
    })
    .expect("valid config");

    let err = engine.solve(&model).expect_err("one iteration is not enough");
    assert_eq!(err, SolveError::PolicyUnstable { limit: 1, changes: 1 });
}

#[test]
fn resolving_from_converged_output_changes_nothing() {
    let model = chain();
    let solution = engine().solve(&model).expect("converges");
    let again = engine()
        .solve_from(&model, solution.policy(), solution.values())
        .expect("warm start converges");

    assert_eq!(again.iterations(), 1);
    assert_eq!(again.sweeps(), 1);
    assert_eq!(again.policy(), solution.policy());
}
