//! Side conditions and weather

use recap_protocol::{Player, to_id};

use super::record::MonRef;

/// A side-wide effect (hazard, screen, etc.) and who set it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideCondition {
    /// Side the condition is active on
    pub side: Player,

    /// Display name ("Stealth Rock")
    pub name: String,

    /// Pokemon that set the condition, when it could be determined
    pub setter: Option<MonRef>,
}

impl SideCondition {
    pub fn new(side: Player, name: impl Into<String>, setter: Option<MonRef>) -> Self {
        Self {
            side,
            name: name.into(),
            setter,
        }
    }

    pub fn id(&self) -> String {
        to_id(&self.name)
    }

    /// Whether `effect` (any display form) names this condition
    pub fn matches(&self, effect: &str) -> bool {
        self.id() == to_id(effect)
    }
}

/// Active weather and who summoned it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherState {
    /// Protocol weather name ("Sandstorm", "RainDance")
    pub name: String,
    pub setter: Option<MonRef>,
}

impl WeatherState {
    pub fn matches(&self, effect: &str) -> bool {
        to_id(&self.name) == to_id(effect)
    }
}
