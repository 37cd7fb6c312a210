//! Gridfall - a scrolling grid arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, entities, tick and shot logic)
//! - `persistence`: Save codec (counters + entity mapping as key-value lines)

pub mod persistence;
pub mod sim;

pub use sim::{Direction, Entity, GameState, Grid, Outcome, ShotKind};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    use glam::IVec2;

    /// Default number of rows (= columns) in the grid
    pub const GRID_SIZE: i32 = 7;

    /// Collectables needed to win a run
    pub const COLLECTION_TARGET: u32 = 7;

    /// One-row step toward the player's row, applied to every entity per tick
    pub const ADVANCE_STEP: IVec2 = IVec2::new(0, -1);

    /// Splash damage offsets around a destroyed bomb (the 8 surrounding cells)
    pub const SPLASH_OFFSETS: [IVec2; 8] = [
        IVec2::new(-1, -1),
        IVec2::new(-1, 0),
        IVec2::new(-1, 1),
        IVec2::new(0, -1),
        IVec2::new(0, 1),
        IVec2::new(1, -1),
        IVec2::new(1, 0),
        IVec2::new(1, 1),
    ];
}

/// Player spawn position for a grid of the given size (center column, row 0)
#[inline]
pub fn player_home(size: i32) -> IVec2 {
    IVec2::new(size / 2, 0)
}
