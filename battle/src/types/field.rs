//! Active field positions

use recap_protocol::to_id;

use super::record::MonRef;

/// A volatile effect on an active position, cleared when the occupant leaves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolatileMarker {
    /// Effect name ("Leech Seed", "confusion")
    pub name: String,

    /// Pokemon responsible for the effect
    pub setter: Option<MonRef>,
}

impl VolatileMarker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            setter: None,
        }
    }

    pub fn with_setter(mut self, setter: Option<MonRef>) -> Self {
        self.setter = setter;
        self
    }

    pub fn matches(&self, effect: &str) -> bool {
        to_id(&self.name) == to_id(effect)
    }
}

/// One active slot on a player's side
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPosition {
    /// Roster entry currently in the slot. Fainted pokemon stay here until
    /// something switches in.
    pub occupant: Option<MonRef>,

    pub volatiles: Vec<VolatileMarker>,
}

impl FieldPosition {
    /// Put a new occupant in the slot, dropping the previous one's volatiles
    pub fn occupy(&mut self, mon: MonRef) {
        self.occupant = Some(mon);
        self.volatiles.clear();
    }

    /// Add or refresh a volatile marker
    pub fn add_volatile(&mut self, marker: VolatileMarker) {
        if let Some(existing) = self.volatiles.iter_mut().find(|v| v.matches(&marker.name)) {
            *existing = marker;
        } else {
            self.volatiles.push(marker);
        }
    }

    /// Remove a volatile marker, returns true if it was present
    pub fn remove_volatile(&mut self, effect: &str) -> bool {
        let before = self.volatiles.len();
        self.volatiles.retain(|v| !v.matches(effect));
        self.volatiles.len() != before
    }

    pub fn volatile(&self, effect: &str) -> Option<&VolatileMarker> {
        self.volatiles.iter().find(|v| v.matches(effect))
    }
}
