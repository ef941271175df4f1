pub mod backup;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod policy_iteration;
pub mod snapshot;
pub mod solution;
pub mod value_iteration;
pub mod values;

#[cfg(test)]
mod tests;
