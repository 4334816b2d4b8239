//! Final summary of an analysis pass

use recap_battle::{BattleStore, PlayerState};
use recap_protocol::GameType;
use serde::Serialize;

use crate::narrative::Event;

/// Result of analyzing one replay
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayAnalysis {
    pub game_type: Option<GameType>,
    pub generation: Option<u8>,
    /// Last turn reached
    pub turns: u32,
    /// Seconds between the first and last timestamp
    pub game_time: u64,
    /// Per-player totals and rosters, in player order
    pub stats: Vec<PlayerState>,
    pub events: Vec<Event>,
}

impl ReplayAnalysis {
    pub fn player(&self, username: &str) -> Option<&PlayerState> {
        self.stats.iter().find(|p| p.username == username)
    }

    pub fn winner(&self) -> Option<&PlayerState> {
        self.stats.iter().find(|p| p.win)
    }
}

/// Fold the final store and narrative into the summary
pub fn aggregate(store: BattleStore, events: Vec<Event>) -> ReplayAnalysis {
    let game_type = store.game_type;
    let generation = store.generation;
    let turns = store.turn;
    let game_time = store.game_time();

    let mut stats = store.into_players();
    for player in &mut stats {
        player.tally();
    }

    ReplayAnalysis {
        game_type,
        generation,
        turns,
        game_time,
        stats,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_battle::KillKind;
    use recap_protocol::{Player, Pokemon};

    #[test]
    fn test_aggregate_totals() {
        let mut store = BattleStore::new();
        store.set_player(Player::P1, "Alice");
        store.set_player(Player::P2, "Bob");
        store.set_game_type(GameType::Singles);
        store.stamp(100);
        store.stamp(460);
        store.advance_turn(12);

        let attacker = store
            .place(&Pokemon::parse("p1a: Lando").unwrap(), "Landorus-Therian", None)
            .unwrap();
        store.place(&Pokemon::parse("p2a: Chomp").unwrap(), "Garchomp", None);
        store.mark_fainted(&Pokemon::parse("p2a: Chomp").unwrap());
        store.record_kill(attacker, KillKind::Direct);
        store.record_kill(attacker, KillKind::Indirect);

        let analysis = aggregate(store, Vec::new());
        assert_eq!(analysis.turns, 12);
        assert_eq!(analysis.game_time, 360);
        assert_eq!(analysis.player("Alice").unwrap().total_kills, 2);
        assert_eq!(analysis.player("Bob").unwrap().total_deaths, 1);
        assert!(analysis.winner().is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let mut store = BattleStore::new();
        store.set_player(Player::P1, "Alice");
        store.set_generation(9);

        let json = serde_json::to_value(aggregate(store, Vec::new())).unwrap();
        assert_eq!(json["gameType"], serde_json::Value::Null);
        assert_eq!(json["generation"], 9);
        assert_eq!(json["gameTime"], 0);
        assert_eq!(json["stats"][0]["username"], "Alice");
        assert_eq!(json["stats"][0]["totalKills"], 0);
        assert!(json["events"].as_array().unwrap().is_empty());
    }
}
