//! One-step lookahead shared by both engines.
//!
//! Terminal next states contribute only their transition reward. Their stored
//! value equals that reward, so adding `gamma * U[next]` on top would count it
//! twice.

use crate::solve::{
    ids::{ActionId, StateKey},
    model::TabularModel,
};

/// Expected discounted return of taking `action` in `state` once and then
/// collecting `values` afterwards.
pub fn action_value<M: TabularModel + ?Sized>(
    model: &M,
    values: &[f64],
    state: StateKey,
    action: ActionId,
    gamma: f64,
) -> f64 {
    model
        .outcomes(state, action)
        .iter()
        .map(|outcome| {
            if model.is_terminal(outcome.next) {
                outcome.prob * outcome.reward
            } else {
                outcome.prob * (outcome.reward + gamma * values[outcome.next.index()])
            }
        })
        .sum()
}

/// Return the maximizing action and its value.
/// Ties keep the earliest action in enumeration order.
/// `None` only when the model has no actions at all.
pub fn greedy_action<M: TabularModel + ?Sized>(
    model: &M,
    values: &[f64],
    state: StateKey,
    gamma: f64,
) -> Option<(ActionId, f64)> {
    let mut best: Option<(ActionId, f64)> = None;
    for action in model.actions() {
        let value = action_value(model, values, state, action, gamma);
        best = match best {
            Some((_, best_value)) if best_value >= value => best,
            _ => Some((action, value)),
        };
    }
    best
}

/// Largest violation of the Bellman optimality equation over ordinary states.
pub fn bellman_residual<M: TabularModel + ?Sized>(model: &M, values: &[f64], gamma: f64) -> f64 {
    model
        .states()
        .filter(|state| !model.is_terminal(*state))
        .filter_map(|state| {
            greedy_action(model, values, state, gamma)
                .map(|(_, best)| (values[state.index()] - best).abs())
        })
        .fold(0.0, f64::max)
}
