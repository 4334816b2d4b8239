//! Human-readable battle narrative

use recap_protocol::Player;
use serde::Serialize;

/// One narrative line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Player the event belongs to, `None` for battle-wide events (tie)
    pub player: Option<Player>,
    /// Turn the event happened on
    pub turn: u32,
    pub message: String,
}

impl Event {
    pub fn new(player: Option<Player>, turn: u32, message: impl Into<String>) -> Self {
        Self {
            player,
            turn,
            message: message.into(),
        }
    }
}

pub(crate) fn direct_kill(victim: &str, attacker: &str, move_name: Option<&str>) -> String {
    match move_name {
        Some(name) => format!("{victim} fainted from {name}, directly by {attacker}"),
        None => format!("{victim} fainted, directly by {attacker}"),
    }
}

pub(crate) fn indirect_kill(victim: &str, effect: &str, setter: &str) -> String {
    format!("{victim} fainted from {effect}, indirectly by {setter}")
}

pub(crate) fn other_faint(victim: &str, effect: Option<&str>) -> String {
    match effect {
        Some(effect) => format!("{victim} fainted from {effect}"),
        None => format!("{victim} fainted"),
    }
}

pub(crate) fn win(username: &str) -> String {
    format!("{username} wins the battle!")
}

pub(crate) fn tie() -> String {
    "The battle ended in a tie".to_string()
}

pub(crate) fn terastallize(species: &str, tera_type: &str) -> String {
    format!("{species} terastallized into the {tera_type} type")
}

pub(crate) fn side_condition(setter: &str, effect: &str, side_owner: &str) -> String {
    format!("{setter} set {effect} on {side_owner}'s side")
}
