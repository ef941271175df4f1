mod policy_iteration_tests;
mod value_iteration_tests;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{ActionId, Outcome, StateKey, TabularModel};

/// Explicit table-backed model used across the solver tests.
pub(crate) struct TableModel {
    terminal: Vec<Option<f64>>,
    outcomes: Vec<Vec<Vec<Outcome>>>,
    action_count: usize,
}

impl TabularModel for TableModel {
    fn state_count(&self) -> usize {
        self.terminal.len()
    }

    fn action_count(&self) -> usize {
        self.action_count
    }

    fn is_terminal(&self, state: StateKey) -> bool {
        self.terminal[state.index()].is_some()
    }

    fn terminal_value(&self, state: StateKey) -> f64 {
        self.terminal[state.index()].unwrap_or(0.0)
    }

    fn outcomes(&self, state: StateKey, action: ActionId) -> &[Outcome] {
        &self.outcomes[state.index()][action.index()]
    }
}

/// States 0 and 1 are ordinary, state 2 is terminal with value 1.
/// Action 0 stays put for free, action 1 advances one state.
pub(crate) fn chain() -> TableModel {
    let stay = |s: usize| vec![Outcome::new(1.0, StateKey::from(s), 0.0)];
    let advance = |s: usize, reward: f64| vec![Outcome::new(1.0, StateKey::from(s + 1), reward)];

    TableModel {
        terminal: vec![None, None, Some(1.0)],
        outcomes: vec![
            vec![stay(0), advance(0, 0.0)],
            vec![stay(1), advance(1, 1.0)],
            vec![Vec::new(), Vec::new()],
        ],
        action_count: 2,
    }
}

/// Random model whose last state is terminal. Transitions into the terminal
/// carry its value as reward, every other reward is drawn from `[-1, 1)`.
pub(crate) fn random_model(states: usize, actions: usize, seed: u64) -> TableModel {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let terminal_state = states - 1;
    let terminal_value = rng.gen_range(-1.0..1.0);

    let mut terminal = vec![None; states];
    terminal[terminal_state] = Some(terminal_value);

    let mut outcomes = Vec::with_capacity(states);
    for s in 0..states {
        if s == terminal_state {
            outcomes.push(vec![Vec::new(); actions]);
            continue;
        }
        let mut per_action = Vec::with_capacity(actions);
        for _ in 0..actions {
            let branches = rng.gen_range(1..=3);
            let weights: Vec<f64> = (0..branches).map(|_| rng.gen_range(0.1..1.0)).collect();
            let total: f64 = weights.iter().sum();
            let dist = weights
                .iter()
                .map(|w| {
                    let next = rng.gen_range(0..states);
                    let reward = if next == terminal_state {
                        terminal_value
                    } else {
                        rng.gen_range(-1.0..1.0)
                    };
                    Outcome::new(w / total, StateKey::from(next), reward)
                })
                .collect();
            per_action.push(dist);
        }
        outcomes.push(per_action);
    }

    TableModel {
        terminal,
        outcomes,
        action_count: actions,
    }
}
