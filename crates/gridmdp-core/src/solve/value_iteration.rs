use log::{debug, info, warn};

use crate::solve::{
    backup::greedy_action,
    config::{SolverConfig, SolverConfigError},
    error::{SolveError, SolvePhase},
    ids::ActionId,
    model::{TabularModel, require_actions},
    snapshot::IterationSnapshot,
    solution::{Solution, policy_indices},
    values::{Policy, ValueTable},
};

/// Bellman-optimality fixed point by repeated synchronous sweeps.
#[derive(Debug, Clone)]
pub struct ValueIteration {
    config: SolverConfig,
}

impl ValueIteration {
    /// Create an engine after validating `config`.
    pub fn new(config: SolverConfig) -> Result<Self, SolverConfigError> {
        config.validate()?;
        Ok(ValueIteration { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve from zero values on every ordinary state.
    pub fn solve<M: TabularModel + ?Sized>(&self, model: &M) -> Result<Solution, SolveError> {
        self.solve_with_hook(model, None, |_| {})
    }

    /// Solve starting from `values` instead of zeros.
    pub fn solve_from<M: TabularModel + ?Sized>(
        &self,
        model: &M,
        values: &[f64],
    ) -> Result<Solution, SolveError> {
        self.solve_with_hook(model, Some(values), |_| {})
    }

    /// Solve and invoke a callback after every sweep.
    ///
    /// The policy reported with each sweep is the greedy action found while
    /// computing that sweep, so the last one is the returned policy.
    pub fn solve_with_hook<M, F>(
        &self,
        model: &M,
        warm: Option<&[f64]>,
        mut on_sweep: F,
    ) -> Result<Solution, SolveError>
    where
        M: TabularModel + ?Sized,
        F: FnMut(&IterationSnapshot),
    {
        require_actions(model)?;
        let mut table = match warm {
            Some(values) => ValueTable::warm(model, values)?,
            None => ValueTable::initial(model),
        };
        let mut policy = Policy::uniform(model, ActionId::from(0));
        let gamma = self.config.gamma;
        let mut trace = Vec::new();
        let mut delta = f64::INFINITY;

        for sweep in 1..=self.config.max_sweeps {
            let mut changes = 0;
            delta = table.sweep(model, |state, previous| {
                match greedy_action(model, previous, state, gamma) {
                    Some((action, value)) => {
                        if policy.set(state, action) {
                            changes += 1;
                        }
                        value
                    }
                    None => previous[state.index()],
                }
            });
            debug!("value iteration sweep {sweep}: delta={delta:e} policy_changes={changes}");

            let snapshot = IterationSnapshot {
                iteration: sweep,
                delta,
                evaluation_sweeps: 1,
                policy_changes: changes,
                values: table.current().to_vec(),
                policy: policy_indices(&policy),
            };
            on_sweep(&snapshot);
            if self.config.record_trace {
                trace.push(snapshot);
            }

            if delta < self.config.epsilon {
                info!("value iteration converged after {sweep} sweeps (delta={delta:e})");
                return Ok(Solution {
                    solver: "value_iteration",
                    values: table.into_values(),
                    policy,
                    iterations: sweep,
                    sweeps: sweep,
                    trace,
                });
            }
        }

        warn!(
            "value iteration hit max_sweeps={} with delta={delta:e}",
            self.config.max_sweeps
        );
        Err(SolveError::NotConverged {
            phase: SolvePhase::ValueIteration,
            limit: self.config.max_sweeps,
            delta,
        })
    }
}
