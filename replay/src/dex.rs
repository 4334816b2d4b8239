//! Species and move metadata lookups
//!
//! The engine only needs two facts from the outside world: the canonical id
//! of a species, and whether a move knocks out its own user. Both are
//! optional; a failed lookup leaves the corresponding field empty.

use std::collections::HashMap;

use phf::phf_set;
use recap_protocol::to_id;
use serde::Deserialize;

use crate::error::AnalyzeError;

/// Moves that faint their user
static SELF_KO_MOVES: phf::Set<&'static str> = phf_set! {
    "explosion",
    "selfdestruct",
    "mistyexplosion",
    "memento",
    "healingwish",
    "lunardance",
    "finalgambit",
};

/// Read-only metadata source
pub trait Dex {
    /// Canonical species id for a display name ("Landorus-Therian")
    fn species_id(&self, name: &str) -> Option<String>;

    /// Whether the move faints its own user
    fn is_self_ko(&self, move_name: &str) -> bool;
}

/// Built-in table of self-KO moves, without species data
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDex;

impl Dex for StaticDex {
    fn species_id(&self, _name: &str) -> Option<String> {
        None
    }

    fn is_self_ko(&self, move_name: &str) -> bool {
        SELF_KO_MOVES.contains(to_id(move_name).as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
struct MoveEntry {
    #[serde(default)]
    selfdestruct: Option<serde_json::Value>,
}

/// Dex backed by Showdown's `pokedex.json` and `moves.json` data.
///
/// The canonical id of an entry is its key in the data object. Moves missing
/// from the data fall back to the built-in table.
#[derive(Debug, Clone, Default)]
pub struct JsonDex {
    species: HashMap<String, serde_json::Value>,
    moves: HashMap<String, MoveEntry>,
}

impl JsonDex {
    /// Load from the JSON text of a pokedex and a moves file
    pub fn from_json(pokedex: &str, moves: &str) -> Result<Self, AnalyzeError> {
        Ok(Self {
            species: serde_json::from_str(pokedex)?,
            moves: serde_json::from_str(moves)?,
        })
    }

    pub fn species_count(&self) -> usize {
        self.species.len()
    }
}

impl Dex for JsonDex {
    fn species_id(&self, name: &str) -> Option<String> {
        let name = name.strip_suffix("-*").unwrap_or(name);
        let id = to_id(name);
        self.species.contains_key(&id).then_some(id)
    }

    fn is_self_ko(&self, move_name: &str) -> bool {
        match self.moves.get(&to_id(move_name)) {
            Some(entry) => match &entry.selfdestruct {
                None | Some(serde_json::Value::Null) | Some(serde_json::Value::Bool(false)) => {
                    false
                }
                Some(_) => true,
            },
            None => StaticDex.is_self_ko(move_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POKEDEX: &str = r#"{
        "landorustherian": {"num": 645, "name": "Landorus-Therian"},
        "indeedee": {"num": 876, "name": "Indeedee"},
        "garchomp": {"num": 445, "name": "Garchomp"}
    }"#;

    const MOVES: &str = r#"{
        "explosion": {"name": "Explosion", "selfdestruct": "always"},
        "finalgambit": {"name": "Final Gambit", "selfdestruct": true},
        "earthquake": {"name": "Earthquake"},
        "mindblown": {"name": "Mind Blown", "selfdestruct": false}
    }"#;

    #[test]
    fn test_static_dex() {
        let dex = StaticDex;
        assert!(dex.is_self_ko("Explosion"));
        assert!(dex.is_self_ko("Misty Explosion"));
        assert!(dex.is_self_ko("Healing Wish"));
        assert!(!dex.is_self_ko("Earthquake"));
        assert_eq!(dex.species_id("Garchomp"), None);
    }

    #[test]
    fn test_json_dex_species() {
        let dex = JsonDex::from_json(POKEDEX, MOVES).unwrap();
        assert_eq!(dex.species_count(), 3);
        assert_eq!(
            dex.species_id("Landorus-Therian").as_deref(),
            Some("landorustherian")
        );
        assert_eq!(dex.species_id("Indeedee-*").as_deref(), Some("indeedee"));
        assert_eq!(dex.species_id("Missingno"), None);
    }

    #[test]
    fn test_json_dex_moves() {
        let dex = JsonDex::from_json(POKEDEX, MOVES).unwrap();
        assert!(dex.is_self_ko("Explosion"));
        assert!(dex.is_self_ko("Final Gambit"));
        assert!(!dex.is_self_ko("Earthquake"));
        assert!(!dex.is_self_ko("Mind Blown"));
        // Not in the data: built-in table
        assert!(dex.is_self_ko("Memento"));
    }

    #[test]
    fn test_json_dex_rejects_bad_data() {
        assert!(matches!(
            JsonDex::from_json("[1, 2]", MOVES),
            Err(AnalyzeError::InvalidDex(_))
        ));
    }
}
