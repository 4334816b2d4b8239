//! Battle state store and its mutation operations

mod effects;
mod roster;
mod store;

pub use store::{BattleStore, MAX_SLOTS};
