//! Roster and HP operations
//!
//! Every operation degrades to a logged no-op when the referenced position or
//! record is not tracked; logs are not guaranteed to be internally consistent.

use recap_protocol::{Player, Pokemon, PokemonDetails};
use tracing::debug;

use super::store::BattleStore;
use crate::types::{CombatantRecord, KillKind, MonRef};

impl BattleStore {
    /// Add a team-preview reveal. A details string is only added once per
    /// player; repeated reveals return the existing entry.
    pub fn reveal(&mut self, player: Player, detail: &str, species_id: Option<String>) -> MonRef {
        let side = self.player_entry(player);

        if let Some(index) = side.team.iter().position(|p| p.detail == detail) {
            return MonRef::new(player, index);
        }

        let mut record = CombatantRecord::new(detail);
        record.species_id = species_id;
        side.team.push(record);
        MonRef::new(player, side.team.len() - 1)
    }

    /// Switch a pokemon into the slot named by `ident`.
    ///
    /// Reuses a pokemon that already appeared under the same nickname, else
    /// promotes the first unbrought reveal whose details match, else creates
    /// a new entry.
    pub fn place(
        &mut self,
        ident: &Pokemon,
        detail: &str,
        species_id: Option<String>,
    ) -> Option<MonRef> {
        let Some(slot) = ident.slot() else {
            debug!(name = %ident.name, "switch without an active slot");
            return None;
        };

        let details = PokemonDetails::parse(detail);
        let side = self.player_entry(ident.player);

        let index = if let Some(index) = side.find_brought(&ident.name) {
            index
        } else if let Some(index) = side
            .team
            .iter()
            .position(|p| !p.brought && p.details().matches(&details))
        {
            let record = &mut side.team[index];
            record.detail = detail.to_string();
            if species_id.is_some() {
                record.species_id = species_id;
            }
            index
        } else {
            let mut record = CombatantRecord::new(detail);
            record.species_id = species_id;
            side.team.push(record);
            side.team.len() - 1
        };

        let record = &mut side.team[index];
        record.brought = true;
        if record.nickname.is_none() {
            record.nickname = Some(ident.name.clone());
        }

        let mon = MonRef::new(ident.player, index);
        self.position_mut(ident.player, slot)?.occupy(mon);
        Some(mon)
    }

    /// Set HP after a damage message. Returns the entry and the HP lost.
    pub fn apply_damage(&mut self, ident: &Pokemon, hp: f64) -> Option<(MonRef, f64)> {
        let Some(mon) = self.resolve(ident) else {
            debug!(name = %ident.name, "damage to untracked pokemon");
            return None;
        };
        let record = self.record_mut(mon)?;
        let delta = (record.hp - hp).max(0.0);
        record.hp = hp;
        Some((mon, delta))
    }

    /// Set HP after a heal message. Returns the entry and the HP restored.
    ///
    /// Benched pokemon (ident without a slot) are found by nickname. Healing
    /// a fainted pokemon above zero revives it.
    pub fn apply_heal(&mut self, ident: &Pokemon, hp: f64) -> Option<(MonRef, f64)> {
        let Some(mon) = self.resolve(ident) else {
            debug!(name = %ident.name, "heal of untracked pokemon");
            return None;
        };
        let record = self.record_mut(mon)?;
        let delta = (hp - record.hp).max(0.0);
        record.hp = hp;
        record.hp_restored += delta;
        if record.fainted && hp > 0.0 {
            record.fainted = false;
        }
        Some((mon, delta))
    }

    /// Mark the pokemon fainted. Returns `None` if it is untracked or
    /// already fainted.
    pub fn mark_fainted(&mut self, ident: &Pokemon) -> Option<MonRef> {
        let Some(mon) = self.resolve(ident) else {
            debug!(name = %ident.name, "faint of untracked pokemon");
            return None;
        };
        let record = self.record_mut(mon)?;
        if record.fainted {
            debug!(name = %ident.name, "pokemon already fainted");
            return None;
        }
        record.fainted = true;
        record.hp = 0.0;
        record.status = None;
        Some(mon)
    }

    pub fn is_fainted(&self, mon: MonRef) -> bool {
        self.record(mon).is_some_and(|r| r.fainted)
    }

    /// Credit a kill to `mon`
    pub fn record_kill(&mut self, mon: MonRef, kind: KillKind) {
        match self.record_mut(mon) {
            Some(record) => record.kills.record(kind),
            None => debug!(?mon, "kill credited to untracked pokemon"),
        }
    }

    /// Credit `delta` damage dealt to `source` and taken to `target`
    pub fn credit_damage(&mut self, source: MonRef, target: MonRef, delta: f64) {
        if let Some(record) = self.record_mut(source) {
            record.damage_dealt += delta;
        }
        self.record_damage_taken(target, delta);
    }

    pub fn record_damage_taken(&mut self, target: MonRef, delta: f64) {
        if let Some(record) = self.record_mut(target) {
            record.damage_taken += delta;
        }
    }

    /// Permanent forme change: replace the whole details string
    pub fn change_details(&mut self, mon: MonRef, detail: &str, species_id: Option<String>) {
        if let Some(record) = self.record_mut(mon) {
            record.detail = detail.to_string();
            if species_id.is_some() {
                record.species_id = species_id;
            }
        }
    }

    /// Temporary forme change: replace only the species part of the details
    pub fn change_forme(&mut self, mon: MonRef, species: &str) {
        if let Some(record) = self.record_mut(mon) {
            record.set_species(species);
        }
    }

    /// Record terastallization in both the details string and the tera field
    pub fn terastallize(&mut self, mon: MonRef, tera_type: &str) {
        if let Some(record) = self.record_mut(mon) {
            if record.details().tera_type.is_none() {
                record.detail = format!("{}, tera:{tera_type}", record.detail);
            }
            record.tera_type = Some(tera_type.to_string());
        }
    }
}
