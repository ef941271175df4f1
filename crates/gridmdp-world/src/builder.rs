use crate::{ActionSpec, Cell, GridError, GridSpec, GridWorld, NoiseSpec, TerminalSpec};

#[derive(Debug, Clone)]
/// Struct to build grid worlds
pub struct GridBuilder {
    rows: usize,
    cols: usize,
    walls: Vec<Cell>,
    terminals: Vec<TerminalSpec>,
    step_reward: f64,
    start: Option<Cell>,
    noise: NoiseSpec,
    actions: Option<Vec<ActionSpec>>,
}

impl GridBuilder {
    /// Create a builder for an empty `rows x cols` grid with zero step reward
    pub fn new(rows: usize, cols: usize) -> Self {
        GridBuilder {
            rows,
            cols,
            walls: Vec::new(),
            terminals: Vec::new(),
            step_reward: 0.0,
            start: None,
            noise: NoiseSpec::default(),
            actions: None,
        }
    }

    /// Block a cell
    pub fn add_wall(&mut self, row: usize, col: usize) -> &mut Self {
        self.walls.push(Cell::new(row, col));
        self
    }

    /// Make a cell absorbing with the reward collected on entering it
    pub fn add_terminal(&mut self, row: usize, col: usize, reward: f64) -> &mut Self {
        self.terminals.push(TerminalSpec { row, col, reward });
        self
    }

    pub fn set_step_reward(&mut self, reward: f64) -> &mut Self {
        self.step_reward = reward;
        self
    }

    pub fn set_start(&mut self, row: usize, col: usize) -> &mut Self {
        self.start = Some(Cell::new(row, col));
        self
    }

    /// Split movement probability between the intended move and the two slips
    pub fn set_noise(&mut self, intended: f64, left: f64, right: f64) -> &mut Self {
        self.noise = NoiseSpec {
            intended,
            left,
            right,
        };
        self
    }

    /// Add an action to a custom action set
    /// The first call replaces the default cardinal moves
    pub fn add_action(
        &mut self,
        name: impl Into<String>,
        symbol: impl Into<String>,
        delta: (i64, i64),
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> &mut Self {
        self.actions.get_or_insert_with(Vec::new).push(ActionSpec {
            name: name.into(),
            symbol: symbol.into(),
            delta: [delta.0, delta.1],
            left: left.into(),
            right: right.into(),
        });
        self
    }

    pub fn build_spec(&self) -> Result<GridSpec, GridError> {
        let spec = GridSpec {
            version: Some(1),
            rows: self.rows,
            cols: self.cols,
            walls: self.walls.clone(),
            terminals: self.terminals.clone(),
            step_reward: self.step_reward,
            start: self.start,
            noise: self.noise,
            actions: self.actions.clone(),
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn compile(&self) -> Result<GridWorld, GridError> {
        let spec = self.build_spec()?;
        spec.compile()
    }
}
