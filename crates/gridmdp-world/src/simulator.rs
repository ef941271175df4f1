use gridmdp_core::{ActionId, Policy, StateKey};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Cell, GridError, GridWorld};

/// Cells visited by one simulated episode and what it earned.
#[derive(Debug, Clone, PartialEq)]
pub struct Episode {
    /// Visited cells, start included.
    pub cells: Vec<Cell>,
    pub discounted_return: f64,
    pub reached_terminal: bool,
}

#[derive(Debug, Clone)]
/// Seeded simulator over a compiled grid.
pub struct GridSimulator {
    world: GridWorld,
    rng: ChaCha8Rng,
}

impl GridSimulator {
    /// Create a simulator with deterministic RNG seed.
    pub fn new(world: GridWorld, seed: u64) -> Self {
        Self {
            world,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Borrow the underlying grid.
    pub fn world(&self) -> &GridWorld {
        &self.world
    }

    /// Sample one `(next_state, reward, terminal)` transition.
    /// Invalid state/action inputs are treated as a no-op terminal transition.
    pub fn step(&mut self, state: StateKey, action: ActionId) -> (StateKey, f64, bool) {
        let sample = (self.rng.next_u64() as f64) / ((u64::MAX as f64) + 1.0);
        self.world
            .sample_transition(state, action, sample)
            .unwrap_or((state, 0.0, true))
    }

    /// Follow `policy` from the start cell for at most `max_steps` moves.
    pub fn rollout(
        &mut self,
        policy: &Policy,
        gamma: f64,
        max_steps: usize,
    ) -> Result<Episode, GridError> {
        let mut state = self.world.start().ok_or(GridError::MissingStart)?;
        let mut cells = Vec::with_capacity(max_steps + 1);
        cells.extend(self.world.cell(state));

        let mut discounted_return = 0.0;
        let mut discount = 1.0;
        let mut reached_terminal = false;

        for _ in 0..max_steps {
            let Some(action) = policy.action(state) else {
                // Only terminal states are left without an action.
                reached_terminal = true;
                break;
            };
            let (next, reward, terminal) = self.step(state, action);
            discounted_return += discount * reward;
            discount *= gamma;
            state = next;
            cells.extend(self.world.cell(state));

            if terminal {
                reached_terminal = true;
                break;
            }
        }

        Ok(Episode {
            cells,
            discounted_return,
            reached_terminal,
        })
    }
}
