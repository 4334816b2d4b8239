//! Shared value types for battle log fields

use serde::Serialize;

/// Player in a battle (p1, p2, p3, p4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    P1,
    P2,
    P3,
    P4,
}

impl Player {
    pub const ALL: [Player; 4] = [Player::P1, Player::P2, Player::P3, Player::P4];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "p1" => Some(Player::P1),
            "p2" => Some(Player::P2),
            "p3" => Some(Player::P3),
            "p4" => Some(Player::P4),
            _ => None,
        }
    }

    /// Parse the player prefix of a position or side string ("p2a: X", "p2: Bob")
    pub fn from_prefix(s: &str) -> Option<Self> {
        s.get(..2).and_then(Self::parse)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::P1 => "p1",
            Player::P2 => "p2",
            Player::P3 => "p3",
            Player::P4 => "p4",
        }
    }

    /// Zero-based index, usable for per-player arrays
    pub fn index(&self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
            Player::P3 => 2,
            Player::P4 => 3,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pokemon identifier in the form "POSITION: NAME" (e.g., "p1a: Pikachu")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    /// Player who owns this pokemon
    pub player: Player,
    /// Position letter (a, b, c for active slots, or None if inactive)
    pub position: Option<char>,
    /// Pokemon's name/nickname
    pub name: String,
}

impl Pokemon {
    /// Parse a pokemon ID string like "p1a: Pikachu" or "p1: Pikachu"
    pub fn parse(s: &str) -> Option<Self> {
        let (pos_part, name) = s.split_once(": ")?;
        let player = Player::from_prefix(pos_part)?;
        let position = pos_part.chars().nth(2);

        Some(Pokemon {
            player,
            position,
            name: name.trim().to_string(),
        })
    }

    /// Active slot index for the position letter, if it names one
    pub fn slot(&self) -> Option<usize> {
        self.position.and_then(position_to_slot)
    }
}

/// Convert a position character to a slot index
pub fn position_to_slot(pos: char) -> Option<usize> {
    match pos {
        'a' => Some(0),
        'b' => Some(1),
        'c' => Some(2),
        _ => None,
    }
}

/// Pokemon details string (species, level, gender, shiny, tera)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PokemonDetails {
    pub species: String,
    pub level: Option<u8>,
    pub gender: Option<char>,
    pub shiny: bool,
    pub tera_type: Option<String>,
}

impl PokemonDetails {
    /// Parse a details string like "Pikachu, L50, M, shiny" or "Arceus-*"
    pub fn parse(s: &str) -> Self {
        let mut details = PokemonDetails::default();
        let parts: Vec<&str> = s.split(", ").map(str::trim).collect();

        if let Some(species) = parts.first() {
            details.species = species.to_string();
        }

        for part in parts.iter().skip(1) {
            if let Some(level_str) = part.strip_prefix('L') {
                details.level = level_str.parse().ok();
            } else if *part == "M" {
                details.gender = Some('M');
            } else if *part == "F" {
                details.gender = Some('F');
            } else if *part == "shiny" {
                details.shiny = true;
            } else if let Some(tera) = part.strip_prefix("tera:") {
                details.tera_type = Some(tera.to_string());
            }
        }

        details
    }

    /// Whether a team-preview reveal (`self`) describes the same pokemon as
    /// an in-battle details string.
    ///
    /// Species must match exactly, or through a wildcard reveal like
    /// "Indeedee-*". Gender and level only have to agree when both sides
    /// state them; shininess and tera type never block a match.
    pub fn matches(&self, actual: &PokemonDetails) -> bool {
        let species_match = match self.species.strip_suffix("-*") {
            Some(base) => {
                actual.species == base
                    || actual
                        .species
                        .strip_prefix(base)
                        .is_some_and(|rest| rest.starts_with('-'))
            }
            None => self.species == actual.species,
        };

        let gender_match = match (self.gender, actual.gender) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        };

        let level_match = match (self.level, actual.level) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        };

        species_match && gender_match && level_match
    }
}

/// HP and status condition (e.g., "100/100", "50/100 slp", "0 fnt")
#[derive(Debug, Clone, PartialEq)]
pub struct HpStatus {
    /// Current HP (as raw value or percentage depending on context)
    pub current: u32,
    /// Max HP (if known)
    pub max: Option<u32>,
    /// Status condition (slp, par, brn, psn, tox, frz, fnt)
    pub status: Option<String>,
}

impl HpStatus {
    /// Parse an HP status string like "100/100", "50/100 slp", or "0 fnt"
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.is_empty() {
            return None;
        }

        let hp_part = parts[0];
        let status = parts.get(1).map(|s| s.to_string());

        if let Some((current_str, max_str)) = hp_part.split_once('/') {
            Some(HpStatus {
                current: current_str.parse().ok()?,
                max: Some(max_str.parse().ok()?),
                status,
            })
        } else {
            Some(HpStatus {
                current: hp_part.parse().ok()?,
                max: None,
                status,
            })
        }
    }

    /// HP as a percentage of max (0-100). Without a max the current value is
    /// already a percentage.
    pub fn percent(&self) -> f64 {
        match self.max {
            Some(0) => 0.0,
            Some(max) => f64::from(self.current) * 100.0 / f64::from(max),
            None => f64::from(self.current).min(100.0),
        }
    }

    pub fn is_fainted(&self) -> bool {
        self.status.as_deref() == Some("fnt")
    }
}

/// Game type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Singles,
    Doubles,
    Triples,
    Multi,
    FreeForAll,
}

impl GameType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "singles" => Some(GameType::Singles),
            "doubles" => Some(GameType::Doubles),
            "triples" => Some(GameType::Triples),
            "multi" => Some(GameType::Multi),
            "freeforall" => Some(GameType::FreeForAll),
            _ => None,
        }
    }
}

/// Side of the field (for side conditions), e.g. "p2: Bob"
#[derive(Debug, Clone, PartialEq)]
pub struct Side {
    pub player: Player,
    pub raw: String,
}

impl Side {
    pub fn parse(s: &str) -> Option<Self> {
        Some(Side {
            player: Player::from_prefix(s)?,
            raw: s.to_string(),
        })
    }
}

/// Normalize a display name into a Showdown id ("Stealth Rock" -> "stealthrock")
pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Strip an effect-kind prefix ("move: ", "item: ", "ability: ") from an effect string
pub fn clean_effect(effect: &str) -> &str {
    let effect = effect.trim();
    for prefix in ["move: ", "item: ", "ability: "] {
        if let Some(rest) = effect.strip_prefix(prefix) {
            return rest.trim();
        }
    }
    effect
}
