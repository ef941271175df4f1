use crate::solve::{
    error::SolveError,
    ids::{ActionId, StateKey},
};

/// One probabilistic result of taking an action: `(prob, next, reward)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub prob: f64,
    pub next: StateKey,
    pub reward: f64,
}

impl Outcome {
    pub fn new(prob: f64, next: StateKey, reward: f64) -> Self {
        Outcome { prob, next, reward }
    }
}

/// Finite MDP with dense state and action ids.
///
/// The solvers only talk to the environment through this trait, so the core
/// never needs to know about grids or coordinates.
///
/// Every method may panic when handed a key outside `0..state_count()` or an
/// action outside `0..action_count()`; such a query is a programming error.
pub trait TabularModel {
    /// Number of solvable states, terminals included.
    fn state_count(&self) -> usize;

    /// Number of actions available in every ordinary state.
    fn action_count(&self) -> usize;

    /// Whether a state is absorbing.
    fn is_terminal(&self, state: StateKey) -> bool;

    /// Fixed value stored for a terminal state. Ignored for ordinary states.
    fn terminal_value(&self, state: StateKey) -> f64;

    /// Outcome distribution for `(state, action)`. Empty for terminal states.
    fn outcomes(&self, state: StateKey, action: ActionId) -> &[Outcome];

    /// Iterate over all state keys in index order.
    fn states(&self) -> impl Iterator<Item = StateKey> {
        (0..self.state_count()).map(StateKey::from)
    }

    /// Iterate over all action ids in enumeration order.
    fn actions(&self) -> impl Iterator<Item = ActionId> {
        (0..self.action_count()).map(ActionId::from)
    }
}

/// Both engines need at least one action whenever some state is not terminal.
pub(crate) fn require_actions<M: TabularModel + ?Sized>(model: &M) -> Result<(), SolveError> {
    if model.action_count() == 0 && model.states().any(|state| !model.is_terminal(state)) {
        return Err(SolveError::NoActions);
    }
    Ok(())
}
