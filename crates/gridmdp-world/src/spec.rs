use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{ActionSet, Cell, GridError, GridWorld, world::PROB_TOLERANCE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Serializable grid world schema used for YAML IO and validation.
pub struct GridSpec {
    /// Schema version for future compatibility checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    pub rows: usize,
    pub cols: usize,
    /// Blocked cells. Walls are not states.
    #[serde(default)]
    pub walls: Vec<Cell>,
    /// Absorbing cells and the reward collected on entering them.
    #[serde(default)]
    pub terminals: Vec<TerminalSpec>,
    /// Reward for every move that does not end in a terminal.
    pub step_reward: f64,
    /// Starting cell for simulated episodes. Solving does not need it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Cell>,
    /// Actuator noise split between the intended and the two perpendicular directions.
    #[serde(default)]
    pub noise: NoiseSpec,
    /// Custom action set. Defaults to the four cardinal moves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionSpec>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerminalSpec {
    pub row: usize,
    pub col: usize,
    pub reward: f64,
}

impl TerminalSpec {
    pub fn cell(&self) -> Cell {
        Cell::new(self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSpec {
    pub intended: f64,
    pub left: f64,
    pub right: f64,
}

impl Default for NoiseSpec {
    fn default() -> Self {
        NoiseSpec {
            intended: 0.8,
            left: 0.1,
            right: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A named move with its displacement and its 90 degree neighbours.
pub struct ActionSpec {
    pub name: String,
    pub symbol: String,
    /// `[d_row, d_col]`
    pub delta: [i64; 2],
    /// Name of the action a left slip turns this one into.
    pub left: String,
    /// Name of the action a right slip turns this one into.
    pub right: String,
}

impl GridSpec {
    /// Validate schema invariants using the crate default tolerance.
    pub fn validate(&self) -> Result<(), GridError> {
        self.validate_with_tolerance(PROB_TOLERANCE)
    }

    /// Validate dimensions, cell sets, rewards, noise and the action set.
    pub fn validate_with_tolerance(&self, tolerance: f64) -> Result<(), GridError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let mut walls = HashSet::with_capacity(self.walls.len());
        for wall in &self.walls {
            self.check_bounds("wall", *wall)?;
            if !walls.insert(*wall) {
                return Err(GridError::DuplicateWall {
                    row: wall.row,
                    col: wall.col,
                });
            }
        }

        let mut terminals = HashSet::with_capacity(self.terminals.len());
        for terminal in &self.terminals {
            let cell = terminal.cell();
            self.check_bounds("terminal", cell)?;
            if walls.contains(&cell) {
                return Err(GridError::WallIsTerminal {
                    row: cell.row,
                    col: cell.col,
                });
            }
            if !terminals.insert(cell) {
                return Err(GridError::DuplicateTerminal {
                    row: cell.row,
                    col: cell.col,
                });
            }
            if !terminal.reward.is_finite() {
                return Err(GridError::InvalidReward {
                    what: format!("terminal reward at {cell}"),
                    value: terminal.reward,
                });
            }
        }

        if !self.step_reward.is_finite() {
            return Err(GridError::InvalidReward {
                what: "step reward".to_string(),
                value: self.step_reward,
            });
        }

        if let Some(start) = self.start {
            self.check_bounds("start", start)?;
            if walls.contains(&start) {
                return Err(GridError::StartIsWall {
                    row: start.row,
                    col: start.col,
                });
            }
        }

        let noise = [
            ("intended", self.noise.intended),
            ("left", self.noise.left),
            ("right", self.noise.right),
        ];
        let mut sum = 0.0_f64;
        for (which, value) in noise {
            if !value.is_finite() || value < 0.0 {
                return Err(GridError::InvalidProbability { which, value });
            }
            sum += value;
        }
        // Intended and perpendicular probabilities must sum to 1 within tolerance.
        if (sum - 1.0).abs() > tolerance {
            return Err(GridError::ProbabilitySum { sum, tolerance });
        }

        if let Some(actions) = &self.actions {
            ActionSet::from_specs(actions)?;
        }

        Ok(())
    }

    fn check_bounds(&self, what: &'static str, cell: Cell) -> Result<(), GridError> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return Err(GridError::OutOfBounds {
                what,
                row: cell.row,
                col: cell.col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Compile this spec into the runtime representation.
    pub fn compile(&self) -> Result<GridWorld, GridError> {
        GridWorld::from_spec(self)
    }
}
