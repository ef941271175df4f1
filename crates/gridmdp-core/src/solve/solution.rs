use crate::solve::{
    ids::StateKey,
    snapshot::{IterationSnapshot, SolutionSnapshot},
    values::Policy,
};

/// Converged output of one solve call.
#[derive(Debug, Clone)]
pub struct Solution {
    pub(crate) solver: &'static str,
    pub(crate) values: Vec<f64>,
    pub(crate) policy: Policy,
    pub(crate) iterations: usize,
    pub(crate) sweeps: usize,
    pub(crate) trace: Vec<IterationSnapshot>,
}

impl Solution {
    /// Converged value of every state, indexed by `StateKey`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn value(&self, state: StateKey) -> f64 {
        self.values[state.index()]
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Outer iterations until convergence. Equals `sweeps` for value iteration.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Synchronous Bellman sweeps performed in total.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Per-iteration snapshots. Empty unless `record_trace` was set.
    pub fn trace(&self) -> &[IterationSnapshot] {
        &self.trace
    }

    pub fn snapshot(&self) -> SolutionSnapshot {
        SolutionSnapshot {
            schema_version: 1,
            solver: self.solver.to_string(),
            iterations: self.iterations,
            sweeps: self.sweeps,
            values: self.values.clone(),
            policy: policy_indices(&self.policy),
            trace: self.trace.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}

pub(crate) fn policy_indices(policy: &Policy) -> Vec<Option<usize>> {
    policy
        .actions()
        .iter()
        .map(|action| action.map(|a| a.index()))
        .collect()
}
