/// Dense index of a solvable state.
/// States are numbered once when the model is built and the numbering never changes afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(usize);

impl StateKey {
    /// Return the underlying state index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for StateKey {
    /// Allow for explicit conversion from usize to StateKey
    fn from(value: usize) -> Self {
        StateKey(value)
    }
}

/// A wraper for an integer index into the model's action enumeration.
/// The enumeration order is also the tie-breaking order of every greedy choice.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(usize);

impl ActionId {
    /// Get the position of the action in the enumeration order.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for ActionId {
    /// Allow for explicit conversion from usize to ActionId
    fn from(value: usize) -> Self {
        ActionId(value)
    }
}
