//! Side conditions, volatiles, status and weather

use recap_protocol::{Player, Pokemon};
use tracing::debug;

use super::store::BattleStore;
use crate::types::{MonRef, SideCondition, StatusMark, VolatileMarker, WeatherState};

impl BattleStore {
    // === Side conditions ===

    /// Start a side condition. Re-applying one (another Spikes layer) keeps
    /// the original setter unless it was unknown.
    pub fn set_side_condition(&mut self, side: Player, effect: &str, setter: Option<MonRef>) {
        if let Some(existing) = self
            .side_conditions
            .iter_mut()
            .find(|c| c.side == side && c.matches(effect))
        {
            if existing.setter.is_none() {
                existing.setter = setter;
            }
            return;
        }
        self.side_conditions
            .push(SideCondition::new(side, effect, setter));
    }

    /// End a side condition, returns true if it was active
    pub fn clear_side_condition(&mut self, side: Player, effect: &str) -> bool {
        let before = self.side_conditions.len();
        self.side_conditions
            .retain(|c| !(c.side == side && c.matches(effect)));
        let removed = self.side_conditions.len() != before;
        if !removed {
            debug!(%side, effect, "ending a side condition that was not active");
        }
        removed
    }

    pub fn side_condition(&self, side: Player, effect: &str) -> Option<&SideCondition> {
        self.side_conditions
            .iter()
            .find(|c| c.side == side && c.matches(effect))
    }

    pub fn side_conditions(&self) -> &[SideCondition] {
        &self.side_conditions
    }

    /// Swap conditions between p1 and p2 (Court Change)
    pub fn swap_side_conditions(&mut self) {
        for cond in &mut self.side_conditions {
            cond.side = match cond.side {
                Player::P1 => Player::P2,
                Player::P2 => Player::P1,
                other => other,
            };
        }
    }

    // === Volatiles ===

    pub fn add_volatile(&mut self, ident: &Pokemon, marker: VolatileMarker) {
        let Some(slot) = ident.slot() else {
            debug!(name = %ident.name, effect = %marker.name, "volatile on inactive pokemon");
            return;
        };
        if let Some(position) = self.position_mut(ident.player, slot) {
            position.add_volatile(marker);
        }
    }

    pub fn remove_volatile(&mut self, ident: &Pokemon, effect: &str) -> bool {
        ident
            .slot()
            .and_then(|slot| self.position_mut(ident.player, slot))
            .is_some_and(|position| position.remove_volatile(effect))
    }

    pub fn volatile(&self, ident: &Pokemon, effect: &str) -> Option<&VolatileMarker> {
        self.position(ident.player, ident.slot()?)?.volatile(effect)
    }

    // === Status ===

    pub fn set_status(&mut self, mon: MonRef, status: &str, setter: Option<MonRef>) {
        match self.record_mut(mon) {
            Some(record) => {
                record.status = Some(StatusMark {
                    status: status.to_string(),
                    setter,
                })
            }
            None => debug!(?mon, status, "status on untracked pokemon"),
        }
    }

    pub fn clear_status(&mut self, mon: MonRef) {
        if let Some(record) = self.record_mut(mon) {
            record.status = None;
        }
    }

    /// Cure status for an entire team
    pub fn cure_team(&mut self, player: Player) {
        if let Some(side) = self.player_mut(player) {
            for record in &mut side.team {
                record.status = None;
            }
        }
    }

    // === Weather ===

    pub fn set_weather(&mut self, name: &str, setter: Option<MonRef>) {
        self.weather = Some(WeatherState {
            name: name.to_string(),
            setter,
        });
    }

    pub fn clear_weather(&mut self) {
        self.weather = None;
    }

    pub fn weather(&self) -> Option<&WeatherState> {
        self.weather.as_ref()
    }
}
