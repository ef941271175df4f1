mod solve;

pub use solve::backup::{action_value, bellman_residual, greedy_action};
pub use solve::config::{SolverConfig, SolverConfigError};
pub use solve::error::{SolveError, SolvePhase};
pub use solve::ids::{ActionId, StateKey};
pub use solve::model::{Outcome, TabularModel};
pub use solve::policy_iteration::PolicyIteration;
pub use solve::snapshot::{IterationSnapshot, SolutionSnapshot};
pub use solve::solution::Solution;
pub use solve::value_iteration::ValueIteration;
pub use solve::values::{Policy, ValueTable, max_abs_diff};
