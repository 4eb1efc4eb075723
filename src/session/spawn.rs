//! Spawn decision policy
//!
//! Pure function of a random source: given the grid size and a penalty
//! probability, decide what the next item is and where it lands. Consecutive
//! draws are independent, so the same cell may repeat back to back.

use rand::Rng;

use crate::consts::{CELL_COUNT, PENALTY_PROBABILITY};

use super::state::{ItemKind, SpawnEvent};

/// Decides the kind and location of each spawned item
#[derive(Debug, Clone, Copy)]
pub struct SpawnPolicy {
    pub cell_count: usize,
    pub penalty_probability: f64,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self {
            cell_count: CELL_COUNT,
            penalty_probability: PENALTY_PROBABILITY,
        }
    }
}

impl SpawnPolicy {
    pub fn new(cell_count: usize, penalty_probability: f64) -> Self {
        Self {
            cell_count: cell_count.max(1),
            penalty_probability: penalty_probability.clamp(0.0, 1.0),
        }
    }

    /// Draw the next spawn event from `rng`
    pub fn next<R: Rng>(&self, rng: &mut R) -> SpawnEvent {
        let kind = if rng.random_bool(self.penalty_probability) {
            ItemKind::Penalty
        } else {
            ItemKind::Reward
        };
        let cell_index = rng.random_range(0..self.cell_count);
        SpawnEvent { kind, cell_index }
    }
}
