//! Domain types for the roster and field store

mod conditions;
mod field;
mod player;
mod record;

pub use conditions::{SideCondition, WeatherState};
pub use field::{FieldPosition, VolatileMarker};
pub use player::PlayerState;
pub use record::{CombatantRecord, KillCount, KillKind, MonRef, StatusMark};
