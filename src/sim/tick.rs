//! Tick advancement, rotation, and shot resolution
//!
//! Free functions that drive a `GameState` forward. The external driver calls
//! `advance` on a fixed cadence and `rotate`/`fire` in response to input; each
//! call runs to completion with no partial state observable.

use std::collections::HashMap;

use glam::IVec2;
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::state::{GameState, Outcome};
use crate::consts::{ADVANCE_STEP, COLLECTION_TARGET, SPLASH_OFFSETS};

/// Horizontal rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column offset applied to every non-player entity
    pub const fn offset(self) -> IVec2 {
        match self {
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

/// The two shot kinds the player can fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotKind {
    /// Picks up collectables, scoring toward the collection target
    Collect,
    /// Removes destroyables, bombs, and (without credit) collectables
    Destroy,
}

/// Advance the game by one tick: shift every entity one row toward the
/// player, resolve drop-offs, then spawn the next row of entities.
pub fn advance(state: &mut GameState) {
    let entities = state.grid.entities();
    let mut shifted = HashMap::with_capacity(entities.len());
    let mut breached = false;

    for (&position, &entity) in entities {
        if entity == Entity::Player {
            shifted.insert(position, entity);
            continue;
        }
        let next = position + ADVANCE_STEP;
        if next.y < 1 {
            // Falling past the player's row loses the game for a destroyable
            // and silently discards anything else.
            if entity == Entity::Destroyable {
                breached = true;
            }
        } else {
            shifted.insert(next, entity);
        }
    }

    state.grid.set_entities(shifted);
    if breached {
        state.decide(Outcome::Lost);
    }

    spawn_wave(state);
}

/// Spawn the incoming row at the far edge of the grid.
///
/// A random count in `[0, size - 3]` of collectables/destroyables, plus a
/// 1-in-4 chance of a blocker, plus (only when no blocker rolled) a 1-in-4
/// chance of a bomb. Each spawned entity gets a distinct random column.
fn spawn_wave(state: &mut GameState) {
    let size = state.grid.size();
    let max_spawn = (size - 3).max(0) as u32;

    let count = state.rng.random_range(0..=max_spawn);
    let mut kinds: Vec<Entity> = (0..count)
        .map(|_| {
            if state.rng.random_bool(0.5) {
                Entity::Collectable
            } else {
                Entity::Destroyable
            }
        })
        .collect();

    if state.rng.random_ratio(1, 4) {
        kinds.push(Entity::Blocker);
    } else if state.rng.random_ratio(1, 4) {
        kinds.push(Entity::Bomb);
    }

    let columns = index::sample(&mut state.rng, size as usize, kinds.len());
    for (column, entity) in columns.into_iter().zip(kinds) {
        state.grid.place(IVec2::new(column as i32, size - 1), entity);
    }

    log::debug!(
        "spawned {} entities, {} on grid",
        count,
        state.grid.entities().len()
    );
}

/// Shift every non-player entity one column in `direction`, wrapping at the
/// grid edges. Rows and the player are unaffected.
pub fn rotate(state: &mut GameState, direction: Direction) {
    let max_column = state.grid.size() - 1;
    let offset = direction.offset();

    let entities = state.grid.entities();
    let mut rotated = HashMap::with_capacity(entities.len());
    for (&position, &entity) in entities {
        if entity == Entity::Player {
            rotated.insert(position, entity);
            continue;
        }
        let mut next = position + offset;
        if next.x > max_column {
            next.x = 0;
        } else if next.x < 0 {
            next.x = max_column;
        }
        rotated.insert(next, entity);
    }

    state.grid.set_entities(rotated);
}

/// Fire a shot up the player's column.
///
/// Scans rows nearest-to-player first. The first blocker halts the shot with
/// no effect; otherwise the first collectable/destroyable/bomb is resolved
/// against the shot kind. The shot counter increments either way.
pub fn fire(state: &mut GameState, shot: ShotKind) {
    state.total_shots += 1;

    let column = state.player_position().x;
    for row in 1..state.grid.size() {
        let target = IVec2::new(column, row);
        let Some(entity) = state.grid.get(target) else {
            continue;
        };
        match entity {
            Entity::Blocker => break,
            Entity::Collectable | Entity::Destroyable | Entity::Bomb => {
                resolve_hit(state, target, entity, shot);
                break;
            }
            // Rows >= 1 never hold the player
            Entity::Player => {}
        }
    }
}

fn resolve_hit(state: &mut GameState, target: IVec2, entity: Entity, shot: ShotKind) {
    match (shot, entity) {
        (ShotKind::Collect, Entity::Collectable) => {
            state.grid.remove(target);
            state.collected += 1;
            if state.collected >= COLLECTION_TARGET {
                state.decide(Outcome::Won);
            }
        }
        // A collect shot fizzles against anything it cannot pick up
        (ShotKind::Collect, _) => {}
        (ShotKind::Destroy, Entity::Collectable) => {
            // Removed but not credited
            state.grid.remove(target);
        }
        (ShotKind::Destroy, Entity::Destroyable) => {
            state.grid.remove(target);
            state.destroyed += 1;
        }
        (ShotKind::Destroy, Entity::Bomb) => {
            state.grid.remove(target);
            state.destroyed += 1;
            for offset in SPLASH_OFFSETS {
                let splashed = target + offset;
                match state.grid.get(splashed) {
                    Some(Entity::Player) | None => {}
                    Some(Entity::Destroyable) => {
                        state.destroyed += 1;
                        state.grid.remove(splashed);
                    }
                    Some(_) => state.grid.remove(splashed),
                }
            }
        }
        (ShotKind::Destroy, _) => {}
    }
}
