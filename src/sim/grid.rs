//! Bounded square grid holding a sparse position -> entity mapping
//!
//! The player's row (y = 0) is reserved: it is never in bounds for generic
//! placement, and only the player entity may sit there.

use std::collections::HashMap;

use glam::IVec2;

use super::entity::Entity;

/// Square grid of `size` rows and columns with sparse occupancy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: i32,
    entities: HashMap<IVec2, Entity>,
}

impl Grid {
    /// Create an empty grid with `size` rows (= columns)
    pub fn new(size: i32) -> Self {
        Self {
            size,
            entities: HashMap::new(),
        }
    }

    /// Number of rows (= columns), fixed at construction
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Valid target range for non-player entities: row 0 is excluded
    pub fn in_bounds(&self, position: IVec2) -> bool {
        0 <= position.x && position.x < self.size && 1 <= position.y && position.y < self.size
    }

    /// Insert `entity` at `position`, replacing any occupant.
    ///
    /// The player is exempt from bounds checking; any other entity aimed
    /// outside the grid is silently dropped.
    pub fn place(&mut self, position: IVec2, entity: Entity) {
        if entity == Entity::Player || self.in_bounds(position) {
            self.entities.insert(position, entity);
        }
    }

    /// Occupant at `position`, if any
    pub fn get(&self, position: IVec2) -> Option<Entity> {
        self.entities.get(&position).copied()
    }

    /// Clear `position`; no-op if already empty
    pub fn remove(&mut self, position: IVec2) {
        self.entities.remove(&position);
    }

    /// Read-only view of the occupancy mapping
    pub fn entities(&self) -> &HashMap<IVec2, Entity> {
        &self.entities
    }

    /// Replace the whole occupancy mapping (tick rebuild / load)
    pub(crate) fn set_entities(&mut self, entities: HashMap<IVec2, Entity>) {
        self.entities = entities;
    }

    /// Display-friendly form: (x, y) -> entity symbol
    pub fn serialize(&self) -> HashMap<(i32, i32), char> {
        self.entities
            .iter()
            .map(|(position, entity)| ((position.x, position.y), entity.symbol()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_place_and_get() {
        let mut grid = Grid::new(7);
        let pos = IVec2::new(3, 4);
        grid.place(pos, Entity::Collectable);
        assert_eq!(grid.get(pos), Some(Entity::Collectable));

        // Placement overwrites
        grid.place(pos, Entity::Blocker);
        assert_eq!(grid.get(pos), Some(Entity::Blocker));
    }

    #[test]
    fn test_out_of_bounds_place_is_noop() {
        let mut grid = Grid::new(7);
        grid.place(IVec2::new(-1, 3), Entity::Collectable);
        grid.place(IVec2::new(7, 3), Entity::Collectable);
        grid.place(IVec2::new(3, 7), Entity::Collectable);
        // Row 0 is reserved for the player
        grid.place(IVec2::new(3, 0), Entity::Destroyable);
        assert!(grid.entities().is_empty());
    }

    #[test]
    fn test_player_exempt_from_bounds() {
        let mut grid = Grid::new(7);
        grid.place(IVec2::new(3, 0), Entity::Player);
        assert_eq!(grid.get(IVec2::new(3, 0)), Some(Entity::Player));
    }

    #[test]
    fn test_remove_empty_is_noop() {
        let mut grid = Grid::new(7);
        grid.remove(IVec2::new(2, 2));
        assert!(grid.entities().is_empty());
    }

    #[test]
    fn test_serialize_symbols() {
        let mut grid = Grid::new(7);
        grid.place(IVec2::new(3, 0), Entity::Player);
        grid.place(IVec2::new(1, 2), Entity::Bomb);
        let cells = grid.serialize();
        assert_eq!(cells.get(&(3, 0)), Some(&'P'));
        assert_eq!(cells.get(&(1, 2)), Some(&'O'));
        assert_eq!(cells.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_in_bounds_matches_ranges(x in -20i32..20, y in -20i32..20) {
            let grid = Grid::new(7);
            let expected = (0..7).contains(&x) && (1..7).contains(&y);
            prop_assert_eq!(grid.in_bounds(IVec2::new(x, y)), expected);
        }

        #[test]
        fn prop_non_player_place_respects_bounds(x in -20i32..20, y in -20i32..20) {
            let mut grid = Grid::new(7);
            let pos = IVec2::new(x, y);
            grid.place(pos, Entity::Destroyable);
            if grid.in_bounds(pos) {
                prop_assert_eq!(grid.get(pos), Some(Entity::Destroyable));
            } else {
                prop_assert!(grid.entities().is_empty());
            }
        }
    }
}
