use std::collections::HashMap;

use gridmdp_core::{ActionId, Outcome, StateKey, TabularModel};
use log::debug;

use crate::{ActionSet, Cell, CellIndex, GridError, GridSpec, NoiseSpec};

/// Floating point tolerance used when validating probability sums.
pub(crate) const PROB_TOLERANCE: f64 = 1e-9;

/// What occupies a grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellKind {
    Ordinary,
    /// Absorbing cell with the reward collected on entering it.
    Terminal(f64),
    Wall,
}

/// One stochastic result of a move, in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub prob: f64,
    pub next: Cell,
    pub reward: f64,
}

#[derive(Debug, Clone)]
/// Runtime form of a grid with dense state keys and precomputed outcome tables.
pub struct GridWorld {
    rows: usize,
    cols: usize,
    kinds: Vec<CellKind>,
    index: CellIndex,
    actions: ActionSet,
    noise: NoiseSpec,
    step_reward: f64,
    start: Option<StateKey>,
    states: Vec<StateRec>,
}

#[derive(Debug, Clone)]
struct StateRec {
    terminal: Option<f64>,
    actions: Vec<ActionRec>,
}

#[derive(Debug, Clone)]
struct ActionRec {
    outcomes: Vec<Outcome>,
    cdf: Vec<f64>,
}

impl GridWorld {
    /// Compile and validate a spec into a fast runtime representation.
    pub(crate) fn from_spec(spec: &GridSpec) -> Result<Self, GridError> {
        spec.validate_with_tolerance(PROB_TOLERANCE)?;

        let actions = match &spec.actions {
            Some(specs) => ActionSet::from_specs(specs)?,
            None => ActionSet::cardinal(),
        };

        let terminal_rewards: HashMap<Cell, f64> = spec
            .terminals
            .iter()
            .map(|t| (t.cell(), t.reward))
            .collect();
        let mut kinds = vec![CellKind::Ordinary; spec.rows * spec.cols];
        for wall in &spec.walls {
            kinds[wall.row * spec.cols + wall.col] = CellKind::Wall;
        }
        for (cell, reward) in &terminal_rewards {
            kinds[cell.row * spec.cols + cell.col] = CellKind::Terminal(*reward);
        }

        let index = CellIndex::new(spec.rows, spec.cols, |cell| {
            kinds[cell.row * spec.cols + cell.col] != CellKind::Wall
        });
        let start = spec.start.and_then(|cell| index.key_of(cell));

        let mut world = GridWorld {
            rows: spec.rows,
            cols: spec.cols,
            kinds,
            index,
            actions,
            noise: spec.noise,
            step_reward: spec.step_reward,
            start,
            states: Vec::new(),
        };

        let mut states = Vec::with_capacity(world.index.len());
        for &cell in world.index.cells() {
            let terminal = match world.kind(cell) {
                Some(CellKind::Terminal(reward)) => Some(reward),
                _ => None,
            };

            let mut action_recs = Vec::with_capacity(world.actions.len());
            for action in world.actions.ids() {
                let outcomes = if terminal.is_some() {
                    Vec::new()
                } else {
                    world.resolve(cell, action)
                };
                let mut cumulative = 0.0_f64;
                let cdf = outcomes
                    .iter()
                    .map(|outcome| {
                        cumulative += outcome.prob;
                        cumulative
                    })
                    .collect();
                action_recs.push(ActionRec { outcomes, cdf });
            }

            states.push(StateRec {
                terminal,
                actions: action_recs,
            });
        }
        world.states = states;

        debug!(
            "compiled {}x{} grid: {} states, {} actions",
            world.rows,
            world.cols,
            world.states.len(),
            world.actions.len()
        );
        Ok(world)
    }

    /// Intended move plus both slips, in that order.
    /// A move that would leave the grid or enter a wall keeps the agent in place.
    fn resolve(&self, cell: Cell, action: ActionId) -> Vec<Outcome> {
        let branches = [
            (Some(action), self.noise.intended),
            (self.actions.left(action), self.noise.left),
            (self.actions.right(action), self.noise.right),
        ];

        branches
            .into_iter()
            .filter_map(|(direction, prob)| {
                let delta = self.actions.delta(direction?)?;
                let next = cell
                    .offset(delta)
                    .filter(|target| self.is_valid(*target))
                    .unwrap_or(cell);
                let key = self.index.key_of(next)?;
                Some(Outcome::new(prob, key, self.reward_for(next)))
            })
            .collect()
    }

    fn reward_for(&self, cell: Cell) -> f64 {
        match self.kind(cell) {
            Some(CellKind::Terminal(reward)) => reward,
            _ => self.step_reward,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    pub fn step_reward(&self) -> f64 {
        self.step_reward
    }

    /// Whether `cell` is inside the grid and not a wall.
    pub fn is_valid(&self, cell: Cell) -> bool {
        self.index.contains(cell)
    }

    /// Kind of `cell`, `None` when out of bounds.
    pub fn kind(&self, cell: Cell) -> Option<CellKind> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return None;
        }
        Some(self.kinds[cell.row * self.cols + cell.col])
    }

    pub fn state_key(&self, cell: Cell) -> Option<StateKey> {
        self.index.key_of(cell)
    }

    pub fn cell(&self, key: StateKey) -> Option<Cell> {
        self.index.cell(key)
    }

    pub fn index(&self) -> &CellIndex {
        &self.index
    }

    /// Start cell key, if the spec declared one.
    pub fn start(&self) -> Option<StateKey> {
        self.start
    }

    pub fn action_id(&self, name: &str) -> Result<ActionId, GridError> {
        self.actions
            .id(name)
            .ok_or_else(|| GridError::UnknownActionName {
                name: name.to_string(),
            })
    }

    /// Outcome distribution of taking `action` in `cell`.
    ///
    /// Terminal cells have no outcomes. Ordinary cells always have exactly one
    /// outcome per movement branch. Walls, cells outside the grid and unknown
    /// actions are rejected.
    pub fn transitions(&self, cell: Cell, action: ActionId) -> Result<Vec<Transition>, GridError> {
        if !self.actions.contains(action) {
            return Err(GridError::UnknownAction {
                action: action.index(),
                count: self.actions.len(),
            });
        }
        let key = self.state_key(cell).ok_or(GridError::NotAState {
            row: cell.row,
            col: cell.col,
        })?;

        Ok(self.states[key.index()].actions[action.index()]
            .outcomes
            .iter()
            .filter_map(|outcome| {
                Some(Transition {
                    prob: outcome.prob,
                    next: self.index.cell(outcome.next)?,
                    reward: outcome.reward,
                })
            })
            .collect())
    }

    /// Sample one transition for `(state, action)` using a uniform sample in `[0, 1)`.
    pub(crate) fn sample_transition(
        &self,
        state: StateKey,
        action: ActionId,
        sample: f64,
    ) -> Option<(StateKey, f64, bool)> {
        let rec = self.states.get(state.index())?;
        if rec.terminal.is_some() {
            return Some((state, 0.0, true));
        }

        let action = rec.actions.get(action.index())?;
        if action.outcomes.is_empty() {
            return None;
        }

        let mut chosen_idx = action.cdf.partition_point(|p| *p <= sample);
        if chosen_idx >= action.outcomes.len() {
            chosen_idx = action.outcomes.len() - 1;
        }

        let outcome = &action.outcomes[chosen_idx];
        let next_terminal = self.states.get(outcome.next.index())?.terminal.is_some();
        Some((outcome.next, outcome.reward, next_terminal))
    }
}

impl TabularModel for GridWorld {
    fn state_count(&self) -> usize {
        self.states.len()
    }

    fn action_count(&self) -> usize {
        self.actions.len()
    }

    fn is_terminal(&self, state: StateKey) -> bool {
        self.states[state.index()].terminal.is_some()
    }

    fn terminal_value(&self, state: StateKey) -> f64 {
        self.states[state.index()].terminal.unwrap_or(0.0)
    }

    fn outcomes(&self, state: StateKey, action: ActionId) -> &[Outcome] {
        &self.states[state.index()].actions[action.index()].outcomes
    }
}
