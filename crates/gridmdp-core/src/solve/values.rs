use crate::solve::{
    error::SolveError,
    ids::{ActionId, StateKey},
    model::TabularModel,
};

/// Dense value function indexed by `StateKey`, double-buffered for synchronous sweeps.
///
/// Reads always go to the front buffer and writes to the back buffer, then the
/// two are swapped. A sweep therefore never sees a value written during itself.
#[derive(Debug, Clone)]
pub struct ValueTable {
    front: Vec<f64>,
    back: Vec<f64>,
}

impl ValueTable {
    /// Terminal states start at their fixed value, every other state at zero.
    pub fn initial<M: TabularModel + ?Sized>(model: &M) -> Self {
        let front: Vec<f64> = model
            .states()
            .map(|state| {
                if model.is_terminal(state) {
                    model.terminal_value(state)
                } else {
                    0.0
                }
            })
            .collect();
        let back = front.clone();
        ValueTable { front, back }
    }

    /// Start from caller-supplied values. Terminal entries are still reset to
    /// their fixed value.
    pub fn warm<M: TabularModel + ?Sized>(model: &M, values: &[f64]) -> Result<Self, SolveError> {
        if values.len() != model.state_count() {
            return Err(SolveError::WarmStartLength {
                expected: model.state_count(),
                actual: values.len(),
            });
        }
        let mut table = Self::initial(model);
        for state in model.states().filter(|s| !model.is_terminal(*s)) {
            table.front[state.index()] = values[state.index()];
        }
        table.back.copy_from_slice(&table.front);
        Ok(table)
    }

    /// Values of the last completed sweep.
    pub fn current(&self) -> &[f64] {
        &self.front
    }

    pub fn get(&self, state: StateKey) -> f64 {
        self.front[state.index()]
    }

    pub fn len(&self) -> usize {
        self.front.len()
    }

    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
    }

    /// Run one synchronous sweep.
    ///
    /// `backup(state, previous)` computes the new value of an ordinary state
    /// from the previous sweep's values. Terminal entries are carried over
    /// untouched. Returns the sup-norm change.
    pub fn sweep<M, F>(&mut self, model: &M, mut backup: F) -> f64
    where
        M: TabularModel + ?Sized,
        F: FnMut(StateKey, &[f64]) -> f64,
    {
        let mut delta = 0.0_f64;
        for state in model.states() {
            let idx = state.index();
            let old = self.front[idx];
            let new = if model.is_terminal(state) {
                old
            } else {
                backup(state, &self.front)
            };
            self.back[idx] = new;
            delta = delta.max((new - old).abs());
        }
        std::mem::swap(&mut self.front, &mut self.back);
        delta
    }

    pub fn into_values(self) -> Vec<f64> {
        self.front
    }
}

/// Deterministic policy: one action per ordinary state, `None` on terminals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    actions: Vec<Option<ActionId>>,
}

impl Policy {
    /// Every ordinary state picks `action`.
    pub fn uniform<M: TabularModel + ?Sized>(model: &M, action: ActionId) -> Self {
        let actions = model
            .states()
            .map(|state| (!model.is_terminal(state)).then_some(action))
            .collect();
        Policy { actions }
    }

    /// Wrap a raw action table, checking it against the model.
    /// Entries for terminal states are cleared.
    pub fn from_actions<M: TabularModel + ?Sized>(
        model: &M,
        actions: Vec<Option<ActionId>>,
    ) -> Result<Self, SolveError> {
        if actions.len() != model.state_count() {
            return Err(SolveError::PolicyLength {
                expected: model.state_count(),
                actual: actions.len(),
            });
        }
        let mut policy = Policy { actions };
        for state in model.states() {
            if model.is_terminal(state) {
                policy.actions[state.index()] = None;
                continue;
            }
            if let Some(action) = policy.actions[state.index()] {
                if action.index() >= model.action_count() {
                    return Err(SolveError::InvalidAction {
                        state,
                        action,
                        action_count: model.action_count(),
                    });
                }
            }
        }
        Ok(policy)
    }

    pub fn action(&self, state: StateKey) -> Option<ActionId> {
        self.actions.get(state.index()).copied().flatten()
    }

    pub(crate) fn set(&mut self, state: StateKey, action: ActionId) -> bool {
        let slot = &mut self.actions[state.index()];
        let changed = *slot != Some(action);
        *slot = Some(action);
        changed
    }

    pub fn actions(&self) -> &[Option<ActionId>] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Sup-norm distance between two value functions of equal length.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
