use std::collections::HashMap;

use gridmdp_core::ActionId;

use crate::{ActionSpec, GridError};

/// Enumerated moves with their displacement vectors and slip permutations.
///
/// The enumeration order is the tie-breaking order used by the solvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSet {
    names: Vec<String>,
    symbols: Vec<String>,
    deltas: Vec<(i64, i64)>,
    left: Vec<ActionId>,
    right: Vec<ActionId>,
}

impl ActionSet {
    /// Up, down, left, right. A slip turns each move 90 degrees.
    pub fn cardinal() -> Self {
        let id = |idx: usize| ActionId::from(idx);
        ActionSet {
            names: ["U", "D", "L", "R"].map(String::from).to_vec(),
            symbols: ["↑", "↓", "←", "→"].map(String::from).to_vec(),
            deltas: vec![(-1, 0), (1, 0), (0, -1), (0, 1)],
            // U -> L, D -> R, L -> D, R -> U
            left: vec![id(2), id(3), id(1), id(0)],
            // U -> R, D -> L, L -> U, R -> D
            right: vec![id(3), id(2), id(0), id(1)],
        }
    }

    /// Build and check a custom action set.
    pub fn from_specs(specs: &[ActionSpec]) -> Result<Self, GridError> {
        if specs.is_empty() {
            return Err(GridError::EmptyActionSet);
        }

        let mut by_name = HashMap::with_capacity(specs.len());
        for (idx, spec) in specs.iter().enumerate() {
            if by_name.insert(spec.name.as_str(), ActionId::from(idx)).is_some() {
                return Err(GridError::DuplicateAction {
                    name: spec.name.clone(),
                });
            }
            if spec.delta == [0, 0] {
                return Err(GridError::ZeroDelta {
                    action: spec.name.clone(),
                });
            }
        }

        let resolve = |spec: &ActionSpec, target: &str| {
            by_name
                .get(target)
                .copied()
                .ok_or_else(|| GridError::UnknownPerpendicular {
                    action: spec.name.clone(),
                    target: target.to_string(),
                })
        };

        let mut left = Vec::with_capacity(specs.len());
        let mut right = Vec::with_capacity(specs.len());
        for spec in specs {
            left.push(resolve(spec, &spec.left)?);
            right.push(resolve(spec, &spec.right)?);
        }

        // Turning left then right must come back to the same action, which
        // also makes both maps permutations.
        for (idx, spec) in specs.iter().enumerate() {
            let back_from_left = right[left[idx].index()].index();
            let back_from_right = left[right[idx].index()].index();
            if back_from_left != idx || back_from_right != idx {
                return Err(GridError::PerpendicularMismatch {
                    action: spec.name.clone(),
                });
            }
        }

        Ok(ActionSet {
            names: specs.iter().map(|s| s.name.clone()).collect(),
            symbols: specs.iter().map(|s| s.symbol.clone()).collect(),
            deltas: specs.iter().map(|s| (s.delta[0], s.delta[1])).collect(),
            left,
            right,
        })
    }

    /// Serializable form, used when saving a grid with an explicit action set.
    pub fn to_specs(&self) -> Vec<ActionSpec> {
        (0..self.len())
            .map(|idx| ActionSpec {
                name: self.names[idx].clone(),
                symbol: self.symbols[idx].clone(),
                delta: [self.deltas[idx].0, self.deltas[idx].1],
                left: self.names[self.left[idx].index()].clone(),
                right: self.names[self.right[idx].index()].clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, action: ActionId) -> bool {
        action.index() < self.len()
    }

    /// Look an action up by name.
    pub fn id(&self, name: &str) -> Option<ActionId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(ActionId::from)
    }

    pub fn ids(&self) -> impl Iterator<Item = ActionId> + use<> {
        (0..self.len()).map(ActionId::from)
    }

    pub fn name(&self, action: ActionId) -> Option<&str> {
        self.names.get(action.index()).map(String::as_str)
    }

    pub fn symbol(&self, action: ActionId) -> Option<&str> {
        self.symbols.get(action.index()).map(String::as_str)
    }

    pub fn delta(&self, action: ActionId) -> Option<(i64, i64)> {
        self.deltas.get(action.index()).copied()
    }

    /// The action a left slip produces. Fixed for every state.
    pub fn left(&self, action: ActionId) -> Option<ActionId> {
        self.left.get(action.index()).copied()
    }

    /// The action a right slip produces. Fixed for every state.
    pub fn right(&self, action: ActionId) -> Option<ActionId> {
        self.right.get(action.index()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, delta: [i64; 2], left: &str, right: &str) -> ActionSpec {
        ActionSpec {
            name: name.to_string(),
            symbol: name.to_lowercase(),
            delta,
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    #[test]
    fn cardinal_round_trips_through_specs() {
        let cardinal = ActionSet::cardinal();
        let rebuilt = ActionSet::from_specs(&cardinal.to_specs()).expect("cardinal is valid");
        assert_eq!(rebuilt, cardinal);
    }

    #[test]
    fn cardinal_slips_rotate_ninety_degrees() {
        let actions = ActionSet::cardinal();
        for action in actions.ids() {
            let (dr, dc) = actions.delta(action).expect("known action");
            let left = actions.left(action).and_then(|a| actions.delta(a));
            let right = actions.right(action).and_then(|a| actions.delta(a));
            assert_eq!(left, Some((-dc, dr)));
            assert_eq!(right, Some((dc, -dr)));
        }
    }

    #[test]
    fn unknown_perpendicular_is_rejected() {
        let specs = vec![spec("N", [-1, 0], "W", "N")];
        let err = ActionSet::from_specs(&specs).expect_err("W is missing");
        assert!(matches!(err, GridError::UnknownPerpendicular { .. }));
    }

    #[test]
    fn non_inverse_turns_are_rejected() {
        let specs = vec![
            spec("A", [-1, 0], "B", "B"),
            spec("B", [1, 0], "C", "A"),
            spec("C", [0, 1], "A", "A"),
        ];
        let err = ActionSet::from_specs(&specs).expect_err("turns do not invert");
        assert!(matches!(err, GridError::PerpendicularMismatch { .. }));
    }

    #[test]
    fn duplicate_and_zero_moves_are_rejected() {
        let dup = vec![spec("A", [1, 0], "A", "A"), spec("A", [0, 1], "A", "A")];
        assert!(matches!(
            ActionSet::from_specs(&dup),
            Err(GridError::DuplicateAction { .. })
        ));

        let zero = vec![spec("A", [0, 0], "A", "A")];
        assert!(matches!(
            ActionSet::from_specs(&zero),
            Err(GridError::ZeroDelta { .. })
        ));

        assert!(matches!(
            ActionSet::from_specs(&[]),
            Err(GridError::EmptyActionSet)
        ));
    }
}
