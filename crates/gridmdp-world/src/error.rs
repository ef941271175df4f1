use thiserror::Error;

#[derive(Debug, Error)]
/// Error type for grid loading, validation, compilation, and transition queries.
pub enum GridError {
    #[error("failed to read YAML file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("{what} ({row}, {col}) lies outside the {rows}x{cols} grid")]
    OutOfBounds {
        what: &'static str,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("wall ({row}, {col}) is declared more than once")]
    DuplicateWall { row: usize, col: usize },

    #[error("terminal ({row}, {col}) is declared more than once")]
    DuplicateTerminal { row: usize, col: usize },

    #[error("cell ({row}, {col}) is declared both as a wall and as a terminal")]
    WallIsTerminal { row: usize, col: usize },

    #[error("start cell ({row}, {col}) is a wall")]
    StartIsWall { row: usize, col: usize },

    #[error("{what} must be finite, got {value}")]
    InvalidReward { what: String, value: f64 },

    #[error("{which} probability must be finite and non-negative, got {value}")]
    InvalidProbability { which: &'static str, value: f64 },

    #[error("movement probabilities must be within {tolerance} of 1.0, got {sum}")]
    ProbabilitySum { sum: f64, tolerance: f64 },

    #[error("action set must contain at least one action")]
    EmptyActionSet,

    #[error("duplicate action name '{name}'")]
    DuplicateAction { name: String },

    #[error("action '{action}' has a zero movement vector")]
    ZeroDelta { action: String },

    #[error("action '{action}' names unknown perpendicular action '{target}'")]
    UnknownPerpendicular { action: String, target: String },

    #[error("left and right turns of action '{action}' are not inverse permutations")]
    PerpendicularMismatch { action: String },

    #[error("cell ({row}, {col}) is not a state of this grid")]
    NotAState { row: usize, col: usize },

    #[error("action {action} is outside the action set of {count} actions")]
    UnknownAction { action: usize, count: usize },

    #[error("unknown action name '{name}'")]
    UnknownActionName { name: String },

    #[error("grid declares no start cell")]
    MissingStart,
}
