//! Combatant roster entries

use recap_protocol::{Player, PokemonDetails};

/// Non-owning handle to a roster entry: the owning player and the index into
/// that player's team vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MonRef {
    pub player: Player,
    pub index: usize,
}

impl MonRef {
    pub fn new(player: Player, index: usize) -> Self {
        Self { player, index }
    }

    /// Whether `other` belongs to a different player
    pub fn opposes(&self, other: MonRef) -> bool {
        self.player != other.player
    }
}

/// How a kill was scored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillKind {
    /// The immediately preceding attack
    Direct,
    /// A previously set hazard, status, weather or other residual effect
    Indirect,
}

/// Kill counters for one combatant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KillCount {
    pub direct: u32,
    pub indirect: u32,
}

impl KillCount {
    pub fn total(&self) -> u32 {
        self.direct + self.indirect
    }

    pub fn record(&mut self, kind: KillKind) {
        match kind {
            KillKind::Direct => self.direct += 1,
            KillKind::Indirect => self.indirect += 1,
        }
    }
}

/// Non-volatile status together with whoever inflicted it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMark {
    /// Protocol status code (psn, tox, brn, par, slp, frz)
    pub status: String,
    pub setter: Option<MonRef>,
}

/// One pokemon on a player's team
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CombatantRecord {
    /// Details string as last seen ("Landorus-Therian, M, shiny")
    pub detail: String,

    /// In-battle nickname, assigned on first appearance
    pub nickname: Option<String>,

    /// Canonical species id from the metadata lookup, if it resolved
    pub species_id: Option<String>,

    /// Current HP percent (0-100)
    pub hp: f64,

    pub fainted: bool,

    /// Set once the pokemon actually appears in battle (not just in preview)
    pub brought: bool,

    pub damage_dealt: f64,
    pub damage_taken: f64,
    pub hp_restored: f64,

    pub kills: KillCount,

    pub tera_type: Option<String>,

    #[cfg_attr(feature = "serde", serde(skip))]
    pub status: Option<StatusMark>,
}

impl CombatantRecord {
    /// Create a record from a details string
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            nickname: None,
            species_id: None,
            hp: 100.0,
            fainted: false,
            brought: false,
            damage_dealt: 0.0,
            damage_taken: 0.0,
            hp_restored: 0.0,
            kills: KillCount::default(),
            tera_type: None,
            status: None,
        }
    }

    /// Parsed view of the details string
    pub fn details(&self) -> PokemonDetails {
        PokemonDetails::parse(&self.detail)
    }

    /// Species part of the details string ("Landorus-Therian")
    pub fn species(&self) -> &str {
        self.detail
            .split_once(", ")
            .map_or(self.detail.as_str(), |(species, _)| species)
            .trim()
    }

    /// Display name (nickname if known, otherwise species)
    pub fn name(&self) -> &str {
        self.nickname.as_deref().unwrap_or_else(|| self.species())
    }

    /// Replace the species part of the details string, keeping the rest
    pub fn set_species(&mut self, species: &str) {
        self.detail = match self.detail.split_once(", ") {
            Some((_, rest)) => format!("{species}, {rest}"),
            None => species.to_string(),
        };
    }
}
