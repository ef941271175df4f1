use std::{fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

const DEFAULT_SOLVER_CONFIG_YAML: &str = include_str!("../../config/solver.default.yaml");

/// Fixed parameters shared by both dynamic-programming engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Discount factor, strictly inside `(0, 1)`.
    pub gamma: f64,
    /// Convergence threshold on the sup-norm change of one sweep.
    pub epsilon: f64,
    /// Safety bound on synchronous sweeps per fixed-point loop.
    pub max_sweeps: usize,
    /// Safety bound on policy iteration's outer loop.
    pub max_iterations: usize,
    /// Keep a snapshot of every iteration in the returned solution.
    pub record_trace: bool,
    /// Seed for random initial actions in policy iteration.
    /// `None` seeds every state with the first action instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_policy_seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            gamma: 0.9,
            epsilon: 1e-6,
            max_sweeps: 10_000,
            max_iterations: 1_000,
            record_trace: false,
            initial_policy_seed: None,
        }
    }
}

impl SolverConfig {
    /// Parse a solver config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SolverConfigError> {
        let config: SolverConfig = serde_yaml::from_str(yaml).map_err(SolverConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a solver config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SolverConfigError> {
        let yaml = fs::read_to_string(path).map_err(SolverConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SOLVER_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SolverConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Check the numeric ranges the contraction argument depends on.
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 || self.gamma >= 1.0 {
            return Err(SolverConfigError::Invalid(format!(
                "gamma must lie strictly between 0 and 1, got {}",
                self.gamma
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(SolverConfigError::Invalid(format!(
                "epsilon must be finite and > 0, got {}",
                self.epsilon
            )));
        }
        if self.max_sweeps == 0 {
            return Err(SolverConfigError::Invalid(
                "max_sweeps must be greater than 0".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(SolverConfigError::Invalid(
                "max_iterations must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Error type for loading and validating `SolverConfig`.
#[derive(Debug)]
pub enum SolverConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for SolverConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            SolverConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            SolverConfigError::Invalid(err) => write!(f, "invalid solver config: {err}"),
        }
    }
}

impl std::error::Error for SolverConfigError {}
