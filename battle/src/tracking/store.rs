//! BattleStore - the mutable battle state for one analysis

use recap_protocol::{GameType, Player, Pokemon};
use tracing::debug;

use crate::types::{
    CombatantRecord, FieldPosition, MonRef, PlayerState, SideCondition, WeatherState,
};

/// Number of active slots tracked per side (a, b, c)
pub const MAX_SLOTS: usize = 3;

/// Battle state reconstructed from a log
///
/// Rosters are owned by their [`PlayerState`]. Everything else (field
/// positions, side condition setters, status setters) refers to roster
/// entries through [`MonRef`] handles, so counters only ever live in one
/// place.
#[derive(Debug, Clone, Default)]
pub struct BattleStore {
    // === Battle metadata ===
    /// Game type (singles, doubles, etc.)
    pub game_type: Option<GameType>,

    /// Generation (1-9)
    pub generation: Option<u8>,

    /// Current turn number (0 = not started)
    pub turn: u32,

    /// First timestamp seen (unix seconds)
    pub start_time: Option<u64>,

    /// Last timestamp seen (unix seconds)
    pub end_time: Option<u64>,

    // === State ===
    /// Player sides, indexed by [`Player::index`]
    pub(crate) players: [Option<PlayerState>; 4],

    /// Active positions per player and slot
    pub(crate) field: [[FieldPosition; MAX_SLOTS]; 4],

    /// Active side conditions
    pub(crate) side_conditions: Vec<SideCondition>,

    /// Active weather
    pub(crate) weather: Option<WeatherState>,
}

impl BattleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // === Metadata (first write wins) ===

    /// Register a player's username. Returns false if one was already set.
    pub fn set_player(&mut self, player: Player, username: &str) -> bool {
        let state = self.player_entry(player);
        if !state.username.is_empty() || username.is_empty() {
            return false;
        }
        state.username = username.to_string();
        true
    }

    pub fn set_team_size(&mut self, player: Player, size: u8) -> bool {
        let state = self.player_entry(player);
        if state.team_size.is_some() {
            return false;
        }
        state.team_size = Some(size);
        true
    }

    pub fn set_game_type(&mut self, game_type: GameType) -> bool {
        if self.game_type.is_some() {
            return false;
        }
        self.game_type = Some(game_type);
        true
    }

    pub fn set_generation(&mut self, generation: u8) -> bool {
        if self.generation.is_some() {
            return false;
        }
        self.generation = Some(generation);
        true
    }

    /// Advance the turn counter. Turns never go backwards.
    pub fn advance_turn(&mut self, turn: u32) -> bool {
        if turn < self.turn {
            debug!(turn, current = self.turn, "ignoring out-of-order turn");
            return false;
        }
        self.turn = turn;
        true
    }

    /// Record a timestamp: the first sets the start, every one moves the end
    pub fn stamp(&mut self, timestamp: u64) {
        if self.start_time.is_none() {
            self.start_time = Some(timestamp);
        }
        self.end_time = Some(self.end_time.map_or(timestamp, |end| end.max(timestamp)));
    }

    /// Seconds between first and last timestamp
    pub fn game_time(&self) -> u64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            _ => 0,
        }
    }

    // === Players ===

    /// Get a side by player
    pub fn player(&self, player: Player) -> Option<&PlayerState> {
        self.players[player.index()].as_ref()
    }

    /// Get a side mutably by player
    pub fn player_mut(&mut self, player: Player) -> Option<&mut PlayerState> {
        self.players[player.index()].as_mut()
    }

    /// Get or create a side for a player
    pub(crate) fn player_entry(&mut self, player: Player) -> &mut PlayerState {
        self.players[player.index()].get_or_insert_with(|| PlayerState::new(player, ""))
    }

    /// Find a player by username
    pub fn player_by_name(&self, username: &str) -> Option<Player> {
        self.players()
            .find(|p| p.username == username)
            .map(|p| p.player)
    }

    /// Iterate over all initialized sides
    pub fn players(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.iter().filter_map(|s| s.as_ref())
    }

    /// Iterate over all initialized sides mutably
    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut PlayerState> {
        self.players.iter_mut().filter_map(|s| s.as_mut())
    }

    /// Consume the store, yielding the initialized sides in player order
    pub fn into_players(self) -> Vec<PlayerState> {
        self.players.into_iter().flatten().collect()
    }

    // === Records ===

    pub fn record(&self, mon: MonRef) -> Option<&CombatantRecord> {
        self.player(mon.player)?.team.get(mon.index)
    }

    pub fn record_mut(&mut self, mon: MonRef) -> Option<&mut CombatantRecord> {
        self.player_mut(mon.player)?.team.get_mut(mon.index)
    }

    /// Species name for narrative use, "?" when the handle is dangling
    pub fn species_of(&self, mon: MonRef) -> &str {
        self.record(mon).map_or("?", |r| r.species())
    }

    /// Username (or player id) that owns a handle
    pub fn owner_name(&self, player: Player) -> &str {
        self.player(player).map_or(player.as_str(), |p| p.display_name())
    }

    /// Find a pokemon that has appeared in battle by nickname
    pub fn find_by_nickname(&self, player: Player, nickname: &str) -> Option<MonRef> {
        self.player(player)?
            .find_brought(nickname)
            .map(|index| MonRef::new(player, index))
    }

    // === Field ===

    pub fn position(&self, player: Player, slot: usize) -> Option<&FieldPosition> {
        self.field[player.index()].get(slot)
    }

    pub(crate) fn position_mut(&mut self, player: Player, slot: usize) -> Option<&mut FieldPosition> {
        self.field[player.index()].get_mut(slot)
    }

    /// Roster entry occupying the slot named by an ident
    pub fn occupant(&self, ident: &Pokemon) -> Option<MonRef> {
        self.position(ident.player, ident.slot()?)?.occupant
    }

    /// Resolve an ident to a roster entry.
    ///
    /// Prefers the slot occupant when its nickname agrees with the ident,
    /// then falls back to a nickname search over pokemon that have appeared.
    pub fn resolve(&self, ident: &Pokemon) -> Option<MonRef> {
        if let Some(mon) = self.occupant(ident)
            && self
                .record(mon)
                .is_some_and(|r| r.nickname.as_deref() == Some(ident.name.as_str()))
        {
            return Some(mon);
        }

        self.find_by_nickname(ident.player, &ident.name)
            .or_else(|| self.occupant(ident))
    }

    /// Swap the occupants of two slots on one side (doubles `swap`)
    pub fn swap_positions(&mut self, player: Player, a: usize, b: usize) -> bool {
        if a >= MAX_SLOTS || b >= MAX_SLOTS {
            debug!(%player, a, b, "swap outside tracked slots");
            return false;
        }
        self.field[player.index()].swap(a, b);
        true
    }
}
