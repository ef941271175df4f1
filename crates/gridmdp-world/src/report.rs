//! Plain-text rendering of policies and value functions over the grid.

use std::fmt::Write;

use gridmdp_core::ActionId;

use crate::{Cell, CellKind, GridWorld};

/// One line per grid row: terminals as their signed reward, walls as `XX`,
/// ordinary cells as the symbol of their action.
///
/// `actions` is indexed by state key, as returned by `Policy::actions`.
pub fn render_policy(world: &GridWorld, actions: &[Option<ActionId>]) -> String {
    let mut out = String::new();
    for row in 0..world.rows() {
        for col in 0..world.cols() {
            let cell = Cell::new(row, col);
            match world.kind(cell) {
                Some(CellKind::Terminal(reward)) => {
                    let _ = write!(out, " {reward:+.1} ");
                }
                Some(CellKind::Wall) | None => out.push_str(" XX "),
                Some(CellKind::Ordinary) => {
                    let symbol = world
                        .state_key(cell)
                        .and_then(|key| actions.get(key.index()).copied().flatten())
                        .and_then(|action| world.actions().symbol(action))
                        .unwrap_or("?");
                    let _ = write!(out, " {symbol} ");
                }
            }
        }
        out.push('\n');
    }
    out
}

/// One line per grid row with every state's value to two decimals.
pub fn render_values(world: &GridWorld, values: &[f64]) -> String {
    let mut out = String::new();
    for row in 0..world.rows() {
        for col in 0..world.cols() {
            match world
                .state_key(Cell::new(row, col))
                .and_then(|key| values.get(key.index()))
            {
                Some(value) => {
                    let _ = write!(out, "{value:6.2} ");
                }
                None => out.push_str("  XX   "),
            }
        }
        out.push('\n');
    }
    out
}
