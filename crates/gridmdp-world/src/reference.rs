use crate::{GridBuilder, GridError, GridSpec, GridWorld};

/// YAML form of the reference grid, shipped with the crate.
pub const REFERENCE_GRID_YAML: &str = include_str!("../config/reference.grid.yaml");

/// The classic 3x4 grid:
///
/// ```text
///  0   [ ] [ ] [ ] [+1]
///  1   [ ] [W] [ ] [-1]
///  2   [S] [ ] [ ] [ ]
///       0   1   2   3
/// ```
pub fn reference_spec() -> Result<GridSpec, GridError> {
    GridBuilder::new(3, 4)
        .add_wall(1, 1)
        .add_terminal(0, 3, 1.0)
        .add_terminal(1, 3, -1.0)
        .set_step_reward(-0.04)
        .set_start(2, 0)
        .build_spec()
}

pub fn reference_world() -> Result<GridWorld, GridError> {
    reference_spec()?.compile()
}
