//! Save codec
//!
//! Pure-string encoding of a game for persistence by the embedding layer:
//! - Versioned `key@value` line envelope
//! - Counters stored as decimal values
//! - Entity mapping stored as `x,y:SYMBOL` pairs on a single line
//! - Corruption surfaces as a typed decode error, never a panic
//!
//! Where the save file lives (and whether one exists at all) is the driver's
//! concern; this module only turns state into text and back.

use std::collections::HashMap;

use glam::IVec2;
use thiserror::Error;

use crate::sim::{Entity, GameState, UnknownSymbol};

/// Version stamped into every save; decoding any other version is refused
pub const FORMAT_VERSION: u32 = 1;

/// Decoded save payload, ready to apply to a game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveData {
    pub collected: u32,
    pub destroyed: u32,
    pub total_shots: u32,
    pub entities: HashMap<IVec2, Entity>,
}

impl SaveData {
    /// Push this payload into `state` (wholesale mapping + counter replacement)
    pub fn apply(self, state: &mut GameState) {
        state.restore(
            self.entities,
            self.collected,
            self.destroyed,
            self.total_shots,
        );
    }
}

/// Why a save failed to decode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("unsupported save version: {0}")]
    UnsupportedVersion(u32),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("malformed line (expected key@value): {0:?}")]
    MalformedLine(String),

    #[error("malformed entity entry (expected x,y:SYMBOL): {0:?}")]
    MalformedEntry(String),

    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error(transparent)]
    UnknownSymbol(#[from] UnknownSymbol),
}

/// Encode the game's persistent state as key@value lines.
///
/// The entities line is sorted by row then column so equal states encode to
/// equal text.
pub fn encode(state: &GameState) -> String {
    let mut cells: Vec<(IVec2, Entity)> = state
        .grid()
        .entities()
        .iter()
        .map(|(&position, &entity)| (position, entity))
        .collect();
    cells.sort_by_key(|(position, _)| (position.y, position.x));

    let entities = cells
        .iter()
        .map(|(position, entity)| format!("{},{}:{}", position.x, position.y, entity.symbol()))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "version@{FORMAT_VERSION}\n\
         collected@{}\n\
         destroyed@{}\n\
         total_shots@{}\n\
         entities@{entities}\n",
        state.collected(),
        state.destroyed(),
        state.total_shots(),
    )
}

/// Decode a save previously produced by [`encode`]
pub fn decode(text: &str) -> Result<SaveData, SaveError> {
    let mut version = None;
    let mut collected = None;
    let mut destroyed = None;
    let mut total_shots = None;
    let mut entities = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('@') else {
            return Err(SaveError::MalformedLine(line.to_string()));
        };
        match key {
            "version" => version = Some(parse_number("version", value)?),
            "collected" => collected = Some(parse_number("collected", value)?),
            "destroyed" => destroyed = Some(parse_number("destroyed", value)?),
            "total_shots" => total_shots = Some(parse_number("total_shots", value)?),
            "entities" => entities = Some(parse_entities(value)?),
            _ => return Err(SaveError::MalformedLine(line.to_string())),
        }
    }

    let version = version.ok_or(SaveError::MissingField("version"))?;
    if version != FORMAT_VERSION {
        return Err(SaveError::UnsupportedVersion(version));
    }

    Ok(SaveData {
        collected: collected.ok_or(SaveError::MissingField("collected"))?,
        destroyed: destroyed.ok_or(SaveError::MissingField("destroyed"))?,
        total_shots: total_shots.ok_or(SaveError::MissingField("total_shots"))?,
        entities: entities.ok_or(SaveError::MissingField("entities"))?,
    })
}

fn parse_number(field: &'static str, value: &str) -> Result<u32, SaveError> {
    value.trim().parse().map_err(|_| SaveError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

fn parse_entities(value: &str) -> Result<HashMap<IVec2, Entity>, SaveError> {
    let mut entities = HashMap::new();
    for entry in value.split_whitespace() {
        let malformed = || SaveError::MalformedEntry(entry.to_string());

        let (coords, symbol) = entry.split_once(':').ok_or_else(malformed)?;
        let (x, y) = coords.split_once(',').ok_or_else(malformed)?;
        let x: i32 = x.parse().map_err(|_| malformed())?;
        let y: i32 = y.parse().map_err(|_| malformed())?;

        let mut chars = symbol.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(malformed()),
        };

        entities.insert(IVec2::new(x, y), Entity::from_symbol(symbol)?);
    }
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ShotKind, advance, fire};

    #[test]
    fn test_encode_decode_round_trip() {
        let mut state = GameState::new(7, 7);
        for _ in 0..5 {
            advance(&mut state);
        }
        fire(&mut state, ShotKind::Destroy);

        let text = encode(&state);
        let save = decode(&text).unwrap();

        assert_eq!(save.collected, state.collected());
        assert_eq!(save.destroyed, state.destroyed());
        assert_eq!(save.total_shots, state.total_shots());
        let expected: HashMap<IVec2, Entity> = state
            .grid()
            .entities()
            .iter()
            .map(|(&position, &entity)| (position, entity))
            .collect();
        assert_eq!(save.entities, expected);
    }

    #[test]
    fn test_apply_restores_counters_and_grid() {
        let source = {
            let mut state = GameState::new(7, 3);
            advance(&mut state);
            advance(&mut state);
            state
        };
        let text = encode(&source);

        let mut target = GameState::new(7, 99);
        decode(&text).unwrap().apply(&mut target);

        assert_eq!(target.grid().serialize(), source.grid().serialize());
        assert_eq!(target.total_shots(), source.total_shots());
    }

    #[test]
    fn test_decode_handwritten_save() {
        let text = "version@1\ncollected@2\ndestroyed@1\ntotal_shots@9\nentities@3,0:P 0,6:C 5,2:B\n";
        let save = decode(text).unwrap();
        assert_eq!(save.collected, 2);
        assert_eq!(save.entities.len(), 3);
        assert_eq!(save.entities.get(&IVec2::new(0, 6)), Some(&Entity::Collectable));
        assert_eq!(save.entities.get(&IVec2::new(5, 2)), Some(&Entity::Blocker));
    }

    #[test]
    fn test_decode_empty_entities_line() {
        let text = "version@1\ncollected@0\ndestroyed@0\ntotal_shots@0\nentities@\n";
        let save = decode(text).unwrap();
        assert!(save.entities.is_empty());
    }

    #[test]
    fn test_decode_rejects_bad_version() {
        let text = "version@2\ncollected@0\ndestroyed@0\ntotal_shots@0\nentities@\n";
        assert_eq!(decode(text), Err(SaveError::UnsupportedVersion(2)));
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        let text = "version@1\ncollected@0\nentities@\n";
        assert_eq!(decode(text), Err(SaveError::MissingField("destroyed")));
    }

    #[test]
    fn test_decode_rejects_unknown_symbol() {
        let text = "version@1\ncollected@0\ndestroyed@0\ntotal_shots@0\nentities@1,1:Z\n";
        assert_eq!(
            decode(text),
            Err(SaveError::UnknownSymbol(UnknownSymbol('Z')))
        );
    }

    #[test]
    fn test_decode_rejects_malformed_input() {
        assert!(matches!(
            decode("version@1\nnot a line\n"),
            Err(SaveError::MalformedLine(_))
        ));
        assert!(matches!(
            decode("version@1\ncollected@0\ndestroyed@0\ntotal_shots@0\nentities@1:C\n"),
            Err(SaveError::MalformedEntry(_))
        ));
        assert!(matches!(
            decode("version@1\ncollected@zero\ndestroyed@0\ntotal_shots@0\nentities@\n"),
            Err(SaveError::InvalidNumber { .. })
        ));
    }
}
