//! Roster and field store for Pokemon Showdown replay analysis.
//!
//! # Overview
//!
//! `recap-battle` holds the mutable battle state that the replay engine
//! threads through a log:
//!
//! ```text
//! recap-protocol (tokenizer + field types)
//!        │
//!        ▼
//! recap-battle (roster & field store) ← THIS CRATE
//!        │
//!        ▼
//! recap-replay (attribution + dispatch + aggregation)
//! ```
//!
//! # Main Types
//!
//! - [`CombatantRecord`] - one team member and its counters
//! - [`PlayerState`] - a player and the team they own
//! - [`FieldPosition`] - an active slot and its volatile markers
//! - [`SideCondition`] - a hazard or screen and who set it
//! - [`BattleStore`] - everything above plus turn/timestamp/weather state
//!
//! Roster entries are owned by their player; everything else holds a
//! [`MonRef`] handle.
//!
//! # Example Usage
//!
//! ```
//! use recap_battle::{BattleStore, KillKind};
//! use recap_protocol::{Player, Pokemon};
//!
//! let mut store = BattleStore::new();
//! store.set_player(Player::P1, "Alice");
//! store.reveal(Player::P1, "Landorus-Therian, M", None);
//!
//! let ident = Pokemon::parse("p1a: Lando").unwrap();
//! let lando = store.place(&ident, "Landorus-Therian, M, shiny", None).unwrap();
//! store.record_kill(lando, KillKind::Direct);
//!
//! assert_eq!(store.player(Player::P1).unwrap().team.len(), 1);
//! ```

pub mod tracking;
pub mod types;

pub use tracking::{BattleStore, MAX_SLOTS};
pub use types::{
    CombatantRecord, FieldPosition, KillCount, KillKind, MonRef, PlayerState, SideCondition,
    StatusMark, VolatileMarker, WeatherState,
};

// Re-export commonly used protocol types
pub use recap_protocol::{GameType, Player, Pokemon};
