//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (one draw sequence per tick)
//! - No outcome may depend on hash-map iteration order
//! - No rendering or platform dependencies

pub mod entity;
pub mod grid;
pub mod state;
pub mod tick;

pub use entity::{Entity, UnknownSymbol};
pub use grid::Grid;
pub use state::{GameState, Outcome};
pub use tick::{Direction, ShotKind, advance, fire, rotate};
