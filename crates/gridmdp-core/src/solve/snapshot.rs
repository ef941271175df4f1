use serde::Serialize;

/// State of a solver after one iteration.
/// For value iteration an iteration is one sweep. For policy iteration it is
/// one evaluation followed by one improvement.
#[derive(Debug, Clone, Serialize)]
pub struct IterationSnapshot {
    pub iteration: usize,
    /// Sup-norm value change of the last sweep in this iteration.
    pub delta: f64,
    /// Sweeps spent evaluating the policy. Always 1 for value iteration.
    pub evaluation_sweeps: usize,
    /// Ordinary states whose action changed in this iteration.
    pub policy_changes: usize,
    pub values: Vec<f64>,
    pub policy: Vec<Option<usize>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolutionSnapshot {
    pub schema_version: u32,
    pub solver: String,
    pub iterations: usize,
    pub sweeps: usize,
    pub values: Vec<f64>,
    pub policy: Vec<Option<usize>>,
    pub trace: Vec<IterationSnapshot>,
}
