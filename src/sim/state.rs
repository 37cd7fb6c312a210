//! Game state and outcome tracking
//!
//! All state that must survive a save/load round trip lives here.

use std::collections::HashMap;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::grid::Grid;
use crate::player_home;

/// Result of a run; monotonic once decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Still playing
    #[default]
    Undecided,
    /// Collection target reached
    Won,
    /// A destroyable reached the player's row
    Lost,
}

/// Complete simulation state (deterministic, seed-reproducible)
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) grid: Grid,
    player_pos: IVec2,
    pub(crate) collected: u32,
    pub(crate) destroyed: u32,
    pub(crate) total_shots: u32,
    pub(crate) outcome: Outcome,
    seed: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh game: empty grid of `size` with the player pinned at
    /// the center of row 0
    pub fn new(size: i32, seed: u64) -> Self {
        let player_pos = player_home(size);
        let mut grid = Grid::new(size);
        grid.place(player_pos, Entity::Player);
        Self {
            grid,
            player_pos,
            collected: 0,
            destroyed: 0,
            total_shots: 0,
            outcome: Outcome::Undecided,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Start over on the same grid size with a new seed
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(self.grid.size(), seed);
    }

    /// Replace the entity mapping and counters wholesale (load path).
    ///
    /// Incoming entities pass through the normal placement rule, the player
    /// is re-pinned at its fixed position whatever the mapping says, and a
    /// previously decided outcome is cleared.
    pub fn restore(
        &mut self,
        entities: HashMap<IVec2, Entity>,
        collected: u32,
        destroyed: u32,
        total_shots: u32,
    ) {
        let mut grid = Grid::new(self.grid.size());
        for (position, entity) in entities {
            if entity != Entity::Player {
                grid.place(position, entity);
            }
        }
        grid.place(self.player_pos, Entity::Player);
        self.grid = grid;
        self.collected = collected;
        self.destroyed = destroyed;
        self.total_shots = total_shots;
        self.outcome = Outcome::Undecided;
    }

    /// The grid held by this game
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Grid size shortcut
    pub fn size(&self) -> i32 {
        self.grid.size()
    }

    /// The player's fixed position (constant for the lifetime of the game)
    pub fn player_position(&self) -> IVec2 {
        self.player_pos
    }

    /// Collectables acquired so far
    pub fn collected(&self) -> u32 {
        self.collected
    }

    /// Destroyables (and bombs) credited as destroyed
    pub fn destroyed(&self) -> u32 {
        self.destroyed
    }

    /// Shots taken, hit or miss
    pub fn total_shots(&self) -> u32 {
        self.total_shots
    }

    /// Run seed, for reproducing a game
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Tri-state run outcome; the authoritative accessor
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// True only once the run is decided as won
    pub fn has_won(&self) -> bool {
        self.outcome == Outcome::Won
    }

    /// True only once the run is decided as lost
    pub fn has_lost(&self) -> bool {
        self.outcome == Outcome::Lost
    }

    /// Decide the run; a decided outcome is never overwritten
    pub(crate) fn decide(&mut self, outcome: Outcome) {
        if self.outcome == Outcome::Undecided && outcome != Outcome::Undecided {
            self.outcome = outcome;
        }
    }
}
