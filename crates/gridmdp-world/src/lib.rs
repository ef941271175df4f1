mod actions;
mod builder;
mod cell;
mod error;
mod io;
mod reference;
mod report;
mod simulator;
mod spec;
mod world;

pub use actions::ActionSet;
pub use builder::GridBuilder;
pub use cell::{Cell, CellIndex};
pub use error::GridError;
pub use io::{compile_yaml, load_yaml, save_yaml};
pub use reference::{REFERENCE_GRID_YAML, reference_spec, reference_world};
pub use report::{render_policy, render_values};
pub use simulator::{Episode, GridSimulator};
pub use spec::{ActionSpec, GridSpec, NoiseSpec, TerminalSpec};
pub use world::{CellKind, GridWorld, Transition};

pub use gridmdp_core::{ActionId, StateKey};
