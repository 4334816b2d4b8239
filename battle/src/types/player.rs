//! Player state

use recap_protocol::Player;

use super::record::CombatantRecord;

/// One player and the team they own
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlayerState {
    /// Player identifier (P1, P2, etc.)
    pub player: Player,

    /// Player's username (empty until the `player` message is seen)
    pub username: String,

    /// Declared team size
    pub team_size: Option<u8>,

    /// Sum of direct and indirect kills over the team, set by aggregation
    pub total_kills: u32,

    /// Number of fainted team members, set by aggregation
    pub total_deaths: u32,

    pub win: bool,

    /// Team in reveal order
    pub team: Vec<CombatantRecord>,
}

impl PlayerState {
    pub fn new(player: Player, username: impl Into<String>) -> Self {
        Self {
            player,
            username: username.into(),
            team_size: None,
            total_kills: 0,
            total_deaths: 0,
            win: false,
            team: Vec::new(),
        }
    }

    /// Username, or the player id when the name is unknown
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            self.player.as_str()
        } else {
            &self.username
        }
    }

    /// Find a pokemon that has appeared in battle by its nickname
    pub fn find_brought(&self, nickname: &str) -> Option<usize> {
        self.team
            .iter()
            .position(|p| p.brought && p.nickname.as_deref() == Some(nickname))
    }

    /// Count fainted pokemon
    pub fn fainted_count(&self) -> usize {
        self.team.iter().filter(|p| p.fainted).count()
    }

    /// Fill in `total_kills` and `total_deaths` from the team
    pub fn tally(&mut self) {
        self.total_kills = self.team.iter().map(|p| p.kills.total()).sum();
        self.total_deaths = self.fainted_count() as u32;
    }
}
