//! Entity taxonomy and display symbols
//!
//! The variant set is closed; every match over it is exhaustive and the
//! symbol table round-trips losslessly (symbol -> entity, entity -> symbol).

use serde::{Deserialize, Serialize};

/// Anything that can occupy a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    /// The single player entity, pinned at the center of row 0
    Player,
    /// Removable by a collect shot (scores) or a destroy shot (no credit)
    Collectable,
    /// Removable only by a destroy shot; reaching row 0 loses the game
    Destroyable,
    /// Immune to shots and occludes everything behind it
    Blocker,
    /// Destroy shot removes it and splashes the surrounding cells
    Bomb,
}

/// Decode error for a symbol outside the closed table
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity symbol: {0:?}")]
pub struct UnknownSymbol(pub char);

impl Entity {
    /// Display symbol used for rendering and save encoding
    pub const fn symbol(self) -> char {
        match self {
            Entity::Player => 'P',
            Entity::Collectable => 'C',
            Entity::Destroyable => 'D',
            Entity::Blocker => 'B',
            Entity::Bomb => 'O',
        }
    }

    /// Reconstruct an entity from its display symbol
    pub fn from_symbol(symbol: char) -> Result<Self, UnknownSymbol> {
        match symbol {
            'P' => Ok(Entity::Player),
            'C' => Ok(Entity::Collectable),
            'D' => Ok(Entity::Destroyable),
            'B' => Ok(Entity::Blocker),
            'O' => Ok(Entity::Bomb),
            other => Err(UnknownSymbol(other)),
        }
    }
}
