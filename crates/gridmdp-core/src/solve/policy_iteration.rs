use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::solve::{
    backup::{action_value, greedy_action},
    config::{SolverConfig, SolverConfigError},
    error::{SolveError, SolvePhase},
    ids::ActionId,
    model::{TabularModel, require_actions},
    snapshot::IterationSnapshot,
    solution::{Solution, policy_indices},
    values::{Policy, ValueTable},
};

/// Alternates Jacobi policy evaluation and greedy improvement until no action changes.
#[derive(Debug, Clone)]
pub struct PolicyIteration {
    config: SolverConfig,
}

impl PolicyIteration {
    /// Create an engine after validating `config`.
    pub fn new(config: SolverConfig) -> Result<Self, SolverConfigError> {
        config.validate()?;
        Ok(PolicyIteration { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve from the default seed policy.
    pub fn solve<M: TabularModel + ?Sized>(&self, model: &M) -> Result<Solution, SolveError> {
        let policy = self.initial_policy(model, None)?;
        self.solve_with_hook(model, policy, None, |_| {})
    }

    /// Solve from a partial seed policy, one entry per state.
    /// `None` entries on ordinary states get the default seed action.
    pub fn solve_with_policy<M: TabularModel + ?Sized>(
        &self,
        model: &M,
        partial: &[Option<ActionId>],
    ) -> Result<Solution, SolveError> {
        let policy = self.initial_policy(model, Some(partial))?;
        self.solve_with_hook(model, policy, None, |_| {})
    }

    /// Resume from a known policy and value function.
    pub fn solve_from<M: TabularModel + ?Sized>(
        &self,
        model: &M,
        policy: &Policy,
        values: &[f64],
    ) -> Result<Solution, SolveError> {
        self.solve_with_hook(model, policy.clone(), Some(values), |_| {})
    }

    /// Build the seed policy.
    ///
    /// Ordinary states without a supplied action take the first action, or a
    /// random one drawn from `initial_policy_seed` when it is set.
    pub fn initial_policy<M: TabularModel + ?Sized>(
        &self,
        model: &M,
        partial: Option<&[Option<ActionId>]>,
    ) -> Result<Policy, SolveError> {
        require_actions(model)?;
        let supplied = match partial {
            Some(actions) => actions.to_vec(),
            None => vec![None; model.state_count()],
        };
        let mut policy = Policy::from_actions(model, supplied)?;
        let mut rng = self.config.initial_policy_seed.map(ChaCha8Rng::seed_from_u64);

        for state in model.states() {
            if model.is_terminal(state) || policy.action(state).is_some() {
                continue;
            }
            let action = match rng.as_mut() {
                Some(rng) => ActionId::from(rng.gen_range(0..model.action_count())),
                None => ActionId::from(0),
            };
            policy.set(state, action);
        }
        Ok(policy)
    }

    /// Evaluate `policy` in place by synchronous sweeps until the change drops below epsilon.
    /// Returns the number of sweeps and the final delta.
    pub fn evaluate<M: TabularModel + ?Sized>(
        &self,
        model: &M,
        policy: &Policy,
        values: &mut ValueTable,
    ) -> Result<(usize, f64), SolveError> {
        let gamma = self.config.gamma;
        let mut delta = f64::INFINITY;

        for sweep in 1..=self.config.max_sweeps {
            delta = values.sweep(model, |state, previous| match policy.action(state) {
                Some(action) => action_value(model, previous, state, action, gamma),
                None => previous[state.index()],
            });
            if delta < self.config.epsilon {
                return Ok((sweep, delta));
            }
        }

        warn!(
            "policy evaluation hit max_sweeps={} with delta={delta:e}",
            self.config.max_sweeps
        );
        Err(SolveError::NotConverged {
            phase: SolvePhase::PolicyEvaluation,
            limit: self.config.max_sweeps,
            delta,
        })
    }

    /// Replace every ordinary state's action by the greedy one against `values`.
    /// Returns how many states changed.
    pub fn improve<M: TabularModel + ?Sized>(
        &self,
        model: &M,
        policy: &mut Policy,
        values: &[f64],
    ) -> usize {
        let mut changes = 0;
        for state in model.states().filter(|s| !model.is_terminal(*s)) {
            if let Some((action, _)) = greedy_action(model, values, state, self.config.gamma) {
                if policy.set(state, action) {
                    changes += 1;
                }
            }
        }
        changes
    }

    /// Solve from `policy` and invoke a callback after every outer iteration.
    ///
    /// Each snapshot carries the values of the policy that was just evaluated
    /// and the improved policy derived from them.
    pub fn solve_with_hook<M, F>(
        &self,
        model: &M,
        policy: Policy,
        warm: Option<&[f64]>,
        mut on_iteration: F,
    ) -> Result<Solution, SolveError>
    where
        M: TabularModel + ?Sized,
        F: FnMut(&IterationSnapshot),
    {
        require_actions(model)?;
        let mut policy = Policy::from_actions(model, policy.actions().to_vec())?;

        let mut table = match warm {
            Some(values) => ValueTable::warm(model, values)?,
            None => ValueTable::initial(model),
        };
        let mut trace = Vec::new();
        let mut total_sweeps = 0;
        let mut changes = 0;

        for iteration in 1..=self.config.max_iterations {
            let (sweeps, delta) = self.evaluate(model, &policy, &mut table)?;
            total_sweeps += sweeps;
            changes = self.improve(model, &mut policy, table.current());
            debug!(
                "policy iteration {iteration}: evaluation_sweeps={sweeps} delta={delta:e} policy_changes={changes}"
            );

            let snapshot = IterationSnapshot {
                iteration,
                delta,
                evaluation_sweeps: sweeps,
                policy_changes: changes,
                values: table.current().to_vec(),
                policy: policy_indices(&policy),
            };
            on_iteration(&snapshot);
            if self.config.record_trace {
                trace.push(snapshot);
            }

            if changes == 0 {
                info!(
                    "policy iteration stable after {iteration} iterations ({total_sweeps} evaluation sweeps)"
                );
                return Ok(Solution {
                    solver: "policy_iteration",
                    values: table.into_values(),
                    policy,
                    iterations: iteration,
                    sweeps: total_sweeps,
                    trace,
                });
            }
        }

        warn!(
            "policy iteration hit max_iterations={} with {changes} actions still changing",
            self.config.max_iterations
        );
        Err(SolveError::PolicyUnstable {
            limit: self.config.max_iterations,
            changes,
        })
    }
}
