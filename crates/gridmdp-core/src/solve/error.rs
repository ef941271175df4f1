use std::fmt;

use crate::solve::ids::{ActionId, StateKey};

/// Loop of a solver that can trip its safety bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolvePhase {
    ValueIteration,
    PolicyEvaluation,
}

impl fmt::Display for SolvePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolvePhase::ValueIteration => "value iteration",
            SolvePhase::PolicyEvaluation => "policy evaluation",
        };
        f.write_str(name)
    }
}

/// Error type for running the dynamic-programming engines.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// A loop hit its configured bound before meeting the convergence threshold.
    NotConverged {
        phase: SolvePhase,
        limit: usize,
        delta: f64,
    },
    /// Policy iteration kept changing actions up to its outer iteration bound.
    PolicyUnstable { limit: usize, changes: usize },
    /// Warm-start values do not cover exactly the model's states.
    WarmStartLength { expected: usize, actual: usize },
    /// A supplied policy does not cover exactly the model's states.
    PolicyLength { expected: usize, actual: usize },
    /// A supplied policy names an action the model does not have.
    InvalidAction {
        state: StateKey,
        action: ActionId,
        action_count: usize,
    },
    /// The model has ordinary states but no actions to choose from.
    NoActions,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::NotConverged {
                phase,
                limit,
                delta,
            } => write!(
                f,
                "{phase} failed to converge within {limit} rounds (last delta {delta:e})"
            ),
            SolveError::PolicyUnstable { limit, changes } => write!(
                f,
                "policy still changed {changes} actions after {limit} iterations"
            ),
            SolveError::WarmStartLength { expected, actual } => write!(
                f,
                "warm-start values cover {actual} states, model has {expected}"
            ),
            SolveError::PolicyLength { expected, actual } => write!(
                f,
                "policy covers {actual} states, model has {expected}"
            ),
            SolveError::InvalidAction {
                state,
                action,
                action_count,
            } => write!(
                f,
                "policy selects action {} for state {} but the model has {} actions",
                action.index(),
                state.index(),
                action_count
            ),
            SolveError::NoActions => write!(f, "model has ordinary states but no actions"),
        }
    }
}

impl std::error::Error for SolveError {}
