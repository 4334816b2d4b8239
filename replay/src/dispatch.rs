//! Tag-driven state machine over a tokenized log
//!
//! Every tag with an effect on the analysis maps to one handler. Handlers
//! mutate the [`BattleStore`], keep the last-move and last-damage pointers
//! current, call the resolver for faints and append narrative events.
//! Unknown tags and messages that reference untracked pokemon are skipped.

use recap_battle::{BattleStore, KillKind, MonRef, VolatileMarker};
use recap_protocol::{
    GameType, HpStatus, Message, Player, Pokemon, Side, Tag, clean_effect, to_id,
};
use tracing::{debug, trace};

use crate::dex::Dex;
use crate::narrative::{self, Event};
use crate::resolver::{
    FaintCause, LastMove, ResolveContext, attribute_effect, find_side_condition_parent,
    resolve_damage_source, resolve_faint_cause,
};

type Handler<'a> = fn(&mut Engine<'a>, &Message, usize);

/// Handler for a tag, `None` for tags the analysis ignores
fn handler_for<'a>(tag: Tag) -> Option<Handler<'a>> {
    let handler: Handler<'a> = match tag {
        Tag::Timestamp => Engine::on_timestamp,
        Tag::Turn => Engine::on_turn,
        Tag::Player => Engine::on_player,
        Tag::TeamSize => Engine::on_team_size,
        Tag::GameType => Engine::on_game_type,
        Tag::Gen => Engine::on_gen,
        Tag::Poke => Engine::on_poke,
        Tag::Switch | Tag::Drag | Tag::Replace => Engine::on_switch,
        Tag::Swap => Engine::on_swap,
        Tag::Move => Engine::on_move,
        Tag::Damage => Engine::on_damage,
        Tag::Heal => Engine::on_heal,
        Tag::SetHp => Engine::on_set_hp,
        Tag::Faint => Engine::on_faint,
        Tag::SideStart => Engine::on_side_start,
        Tag::SideEnd => Engine::on_side_end,
        Tag::SwapSideConditions => Engine::on_swap_side_conditions,
        Tag::Status => Engine::on_status,
        Tag::CureStatus => Engine::on_cure_status,
        Tag::CureTeam => Engine::on_cure_team,
        Tag::VolatileStart => Engine::on_volatile_start,
        Tag::VolatileEnd => Engine::on_volatile_end,
        Tag::Activate => Engine::on_activate,
        Tag::Weather => Engine::on_weather,
        Tag::Terastallize => Engine::on_terastallize,
        Tag::DetailsChange => Engine::on_details_change,
        Tag::FormeChange => Engine::on_forme_change,
        Tag::Win => Engine::on_win,
        Tag::Tie => Engine::on_tie,
        Tag::MinorMessage => Engine::on_minor_message,
        _ => return None,
    };
    Some(handler)
}

/// State threaded through one analysis pass
pub struct Engine<'a> {
    messages: &'a [Message],
    dex: &'a dyn Dex,
    store: BattleStore,
    last_move: Option<LastMove>,
    last_damage: Option<usize>,
    events: Vec<Event>,
}

impl<'a> Engine<'a> {
    pub fn new(messages: &'a [Message], dex: &'a dyn Dex) -> Self {
        Self {
            messages,
            dex,
            store: BattleStore::new(),
            last_move: None,
            last_damage: None,
            events: Vec::new(),
        }
    }

    /// Consume every message in order, returning the final store and the
    /// narrative
    pub fn run(mut self) -> (BattleStore, Vec<Event>) {
        let messages = self.messages;
        for (index, message) in messages.iter().enumerate() {
            let Some(tag) = message.tag() else {
                if !message.tag_str().is_empty() {
                    trace!(tag = message.tag_str(), "skipping unknown tag");
                }
                continue;
            };
            if let Some(handler) = handler_for(tag) {
                trace!(?tag, index, "dispatch");
                handler(&mut self, message, index);
            }
        }
        (self.store, self.events)
    }

    fn context(&self) -> ResolveContext<'_> {
        ResolveContext {
            store: &self.store,
            dex: self.dex,
            messages: self.messages,
        }
    }

    fn push_event(&mut self, player: Option<Player>, message: String) {
        self.events
            .push(Event::new(player, self.store.turn, message));
    }

    fn species_id(&self, detail: &str) -> Option<String> {
        let species = detail.split_once(", ").map_or(detail, |(s, _)| s);
        self.dex.species_id(species)
    }

    /// Setter for a minor effect: `[of]` if present, else the user of the
    /// move that caused it
    fn effect_setter(&self, message: &Message, index: usize) -> Option<MonRef> {
        if let Some(of) = message.annotations().of_pokemon() {
            return self.store.resolve(&of);
        }
        let parent = find_side_condition_parent(self.messages, index)?;
        if parent.tag() != Some(Tag::Move) {
            return None;
        }
        self.store.resolve(&parent.pokemon(1)?)
    }

    fn message_hp(message: &Message, index: usize) -> Option<f64> {
        message
            .field(index)
            .and_then(HpStatus::parse)
            .map(|hp| hp.percent())
    }

    // === Metadata ===

    fn on_timestamp(&mut self, message: &Message, _index: usize) {
        match message.arg(1).and_then(|s| s.parse::<u64>().ok()) {
            Some(timestamp) => self.store.stamp(timestamp),
            None => debug!(%message, "malformed timestamp"),
        }
    }

    fn on_turn(&mut self, message: &Message, _index: usize) {
        match message.arg(1).and_then(|s| s.parse::<u32>().ok()) {
            Some(turn) => {
                self.store.advance_turn(turn);
            }
            None => debug!(%message, "malformed turn"),
        }
    }

    fn on_player(&mut self, message: &Message, _index: usize) {
        let (Some(player), Some(username)) =
            (message.arg(1).and_then(Player::parse), message.arg(2))
        else {
            return;
        };
        if !self.store.set_player(player, username) {
            debug!(%player, username, "player already registered");
        }
    }

    fn on_team_size(&mut self, message: &Message, _index: usize) {
        let player = message.arg(1).and_then(Player::parse);
        let size = message.arg(2).and_then(|s| s.parse::<u8>().ok());
        if let (Some(player), Some(size)) = (player, size) {
            self.store.set_team_size(player, size);
        }
    }

    fn on_game_type(&mut self, message: &Message, _index: usize) {
        if let Some(game_type) = message.arg(1).and_then(GameType::parse) {
            self.store.set_game_type(game_type);
        }
    }

    fn on_gen(&mut self, message: &Message, _index: usize) {
        if let Some(generation) = message.arg(1).and_then(|s| s.parse::<u8>().ok()) {
            self.store.set_generation(generation);
        }
    }

    // === Roster ===

    fn on_poke(&mut self, message: &Message, _index: usize) {
        let (Some(player), Some(detail)) =
            (message.arg(1).and_then(Player::parse), message.arg(2))
        else {
            debug!(%message, "malformed poke");
            return;
        };
        let species_id = self.species_id(detail);
        self.store.reveal(player, detail, species_id);
    }

    fn on_switch(&mut self, message: &Message, _index: usize) {
        let (Some(ident), Some(detail)) = (message.pokemon(1), message.arg(2)) else {
            debug!(%message, "malformed switch");
            return;
        };
        let species_id = self.species_id(detail);
        self.store.place(&ident, detail, species_id);
    }

    fn on_swap(&mut self, message: &Message, _index: usize) {
        let Some(ident) = message.pokemon(1) else {
            return;
        };
        let target = message.arg(2).and_then(|s| s.parse::<usize>().ok());
        if let (Some(slot), Some(target)) = (ident.slot(), target) {
            self.store.swap_positions(ident.player, slot, target);
        }
    }

    fn on_details_change(&mut self, message: &Message, _index: usize) {
        let (Some(ident), Some(detail)) = (message.pokemon(1), message.arg(2)) else {
            return;
        };
        let species_id = self.species_id(detail);
        match self.store.resolve(&ident) {
            Some(mon) => self.store.change_details(mon, detail, species_id),
            None => debug!(name = %ident.name, "details change of untracked pokemon"),
        }
    }

    fn on_forme_change(&mut self, message: &Message, _index: usize) {
        let (Some(ident), Some(species)) = (message.pokemon(1), message.arg(2)) else {
            return;
        };
        if let Some(mon) = self.store.resolve(&ident) {
            self.store.change_forme(mon, species);
        }
    }

    fn on_terastallize(&mut self, message: &Message, _index: usize) {
        let (Some(ident), Some(tera_type)) = (message.pokemon(1), message.arg(2)) else {
            return;
        };
        let Some(mon) = self.store.resolve(&ident) else {
            debug!(name = %ident.name, "tera of untracked pokemon");
            return;
        };
        self.store.terastallize(mon, tera_type);
        let text = narrative::terastallize(self.store.species_of(mon), tera_type);
        self.push_event(Some(mon.player), text);
    }

    // === Actions ===

    fn on_move(&mut self, message: &Message, index: usize) {
        let (Some(ident), Some(name)) = (message.pokemon(1), message.arg(2)) else {
            debug!(%message, "malformed move");
            return;
        };
        self.last_move = Some(LastMove {
            source: self.store.resolve(&ident),
            source_ident: ident,
            name: name.to_string(),
            target: message.pokemon(3),
            index,
        });
    }

    fn on_damage(&mut self, message: &Message, index: usize) {
        let (Some(ident), Some(hp)) = (message.pokemon(1), Self::message_hp(message, 2)) else {
            debug!(%message, "malformed damage");
            return;
        };
        self.last_damage = Some(index);
        let Some((target, delta)) = self.store.apply_damage(&ident, hp) else {
            return;
        };

        let annotations = message.annotations();
        let source = match annotations.from.as_deref() {
            None => resolve_damage_source(self.last_move.as_ref(), target),
            Some(effect) => attribute_effect(
                self.context(),
                &ident,
                target,
                effect,
                annotations.of_pokemon().as_ref(),
            )
            .credited(),
        };

        match source {
            Some(source) => self.store.credit_damage(source, target, delta),
            None => self.store.record_damage_taken(target, delta),
        }
    }

    fn on_heal(&mut self, message: &Message, _index: usize) {
        let (Some(ident), Some(hp)) = (message.pokemon(1), Self::message_hp(message, 2)) else {
            debug!(%message, "malformed heal");
            return;
        };
        self.store.apply_heal(&ident, hp);
    }

    /// `-sethp` is routed through damage or heal depending on direction.
    /// Older logs set two pokemon in one message.
    fn on_set_hp(&mut self, message: &Message, _index: usize) {
        for (ident_field, hp_field) in [(1, 2), (3, 4)] {
            let (Some(ident), Some(hp)) = (
                message.pokemon(ident_field),
                Self::message_hp(message, hp_field),
            ) else {
                continue;
            };
            let Some(mon) = self.store.resolve(&ident) else {
                continue;
            };
            let current = self.store.record(mon).map_or(hp, |r| r.hp);
            if hp < current {
                if let Some((target, delta)) = self.store.apply_damage(&ident, hp) {
                    self.store.record_damage_taken(target, delta);
                }
            } else {
                self.store.apply_heal(&ident, hp);
            }
        }
    }

    fn on_faint(&mut self, message: &Message, index: usize) {
        let Some(ident) = message.pokemon(1) else {
            debug!(%message, "malformed faint");
            return;
        };
        let Some(victim) = self.store.resolve(&ident) else {
            debug!(name = %ident.name, "faint of untracked pokemon");
            return;
        };
        if self.store.is_fainted(victim) {
            debug!(name = %ident.name, "duplicate faint");
            return;
        }

        let cause = resolve_faint_cause(
            self.context(),
            &ident,
            index,
            self.last_damage,
            self.last_move.as_ref(),
        );
        self.store.mark_fainted(&ident);

        let victim_name = self.store.species_of(victim).to_string();
        let text = match &cause {
            FaintCause::DirectKill { attacker } => {
                self.store.record_kill(*attacker, KillKind::Direct);
                narrative::direct_kill(
                    &victim_name,
                    self.store.species_of(*attacker),
                    self.last_move.as_ref().map(|m| m.name.as_str()),
                )
            }
            FaintCause::IndirectKill { setter, effect } => {
                self.store.record_kill(*setter, KillKind::Indirect);
                narrative::indirect_kill(&victim_name, effect, self.store.species_of(*setter))
            }
            FaintCause::SelfKill { effect } => narrative::other_faint(&victim_name, Some(effect)),
            FaintCause::Unknown { effect } => {
                narrative::other_faint(&victim_name, effect.as_deref())
            }
        };
        debug!(?cause, victim = %victim_name, "faint resolved");
        self.push_event(Some(victim.player), text);
    }

    // === Side conditions ===

    fn on_side_start(&mut self, message: &Message, index: usize) {
        let (Some(side), Some(effect)) = (message.arg(1).and_then(Side::parse), message.arg(2))
        else {
            debug!(%message, "malformed sidestart");
            return;
        };
        let effect = clean_effect(effect);
        let setter = self.effect_setter(message, index);
        self.store.set_side_condition(side.player, effect, setter);

        if let Some(setter) = setter {
            let text = narrative::side_condition(
                self.store.species_of(setter),
                effect,
                self.store.owner_name(side.player),
            );
            self.push_event(Some(setter.player), text);
        }
    }

    fn on_side_end(&mut self, message: &Message, _index: usize) {
        if let (Some(side), Some(effect)) = (message.arg(1).and_then(Side::parse), message.arg(2))
        {
            self.store
                .clear_side_condition(side.player, clean_effect(effect));
        }
    }

    fn on_swap_side_conditions(&mut self, _message: &Message, _index: usize) {
        self.store.swap_side_conditions();
    }

    // === Status ===

    /// Status setter: `[of]`, else the move that inflicted it. Poison picked
    /// up on switch-in comes from Toxic Spikes. Statuses from the holder's own
    /// item or ability have no setter.
    fn status_setter(
        &self,
        message: &Message,
        index: usize,
        victim: &Pokemon,
        status: &str,
    ) -> Option<MonRef> {
        let annotations = message.annotations();
        if let Some(of) = annotations.of_pokemon() {
            return self.store.resolve(&of);
        }
        if annotations.from.is_some() {
            return None;
        }

        let parent = find_side_condition_parent(self.messages, index)?;
        match parent.tag()? {
            Tag::Move => self.store.resolve(&parent.pokemon(1)?),
            Tag::Switch | Tag::Drag if matches!(status, "psn" | "tox") => self
                .store
                .side_condition(victim.player, "Toxic Spikes")
                .and_then(|c| c.setter),
            _ => None,
        }
    }

    fn on_status(&mut self, message: &Message, index: usize) {
        let (Some(ident), Some(status)) = (message.pokemon(1), message.arg(2)) else {
            return;
        };
        let Some(mon) = self.store.resolve(&ident) else {
            debug!(name = %ident.name, "status on untracked pokemon");
            return;
        };
        let setter = self
            .status_setter(message, index, &ident, status)
            .filter(|setter| *setter != mon);
        self.store.set_status(mon, status, setter);
    }

    fn on_cure_status(&mut self, message: &Message, _index: usize) {
        if let Some(mon) = message.pokemon(1).and_then(|p| self.store.resolve(&p)) {
            self.store.clear_status(mon);
        }
    }

    fn on_cure_team(&mut self, message: &Message, _index: usize) {
        if let Some(ident) = message.pokemon(1) {
            self.store.cure_team(ident.player);
        }
    }

    // === Volatiles ===

    fn on_volatile_start(&mut self, message: &Message, index: usize) {
        let (Some(ident), Some(effect)) = (message.pokemon(1), message.arg(2)) else {
            return;
        };
        let marker = VolatileMarker::new(clean_effect(effect))
            .with_setter(self.effect_setter(message, index));
        self.store.add_volatile(&ident, marker);
    }

    fn on_volatile_end(&mut self, message: &Message, _index: usize) {
        if let (Some(ident), Some(effect)) = (message.pokemon(1), message.arg(2)) {
            self.store.remove_volatile(&ident, clean_effect(effect));
        }
    }

    /// Partial trapping shows up as `-activate|TARGET|move: Wrap|[of] USER`
    fn on_activate(&mut self, message: &Message, _index: usize) {
        let (Some(ident), Some(effect)) = (message.pokemon(1), message.arg(2)) else {
            return;
        };
        let Some(name) = effect.strip_prefix("move: ") else {
            return;
        };
        let Some(of) = message.annotations().of_pokemon() else {
            return;
        };
        let setter = self.store.resolve(&of);
        self.store
            .add_volatile(&ident, VolatileMarker::new(name).with_setter(setter));
    }

    // === Weather ===

    fn on_weather(&mut self, message: &Message, index: usize) {
        let Some(name) = message.arg(1) else {
            return;
        };
        if to_id(name) == "none" {
            self.store.clear_weather();
            return;
        }
        if message.annotations().has_flag("upkeep")
            && self.store.weather().is_some_and(|w| w.matches(name))
        {
            return;
        }
        let setter = self.effect_setter(message, index);
        self.store.set_weather(name, setter);
    }

    // === Outcome ===

    fn on_win(&mut self, message: &Message, _index: usize) {
        let Some(username) = message.arg(1) else {
            return;
        };
        let player = self.store.player_by_name(username);
        if let Some(state) = player.and_then(|p| self.store.player_mut(p)) {
            state.win = true;
        } else {
            debug!(username, "winner is not a registered player");
        }
        self.push_event(player, narrative::win(username));
    }

    fn on_tie(&mut self, _message: &Message, _index: usize) {
        self.push_event(None, narrative::tie());
    }

    /// Forfeits only appear as free-form `-message` text
    fn on_minor_message(&mut self, message: &Message, _index: usize) {
        let Some(text) = message.arg(1) else {
            return;
        };
        let username = text
            .strip_suffix(" forfeited.")
            .or_else(|| text.strip_suffix(" lost due to inactivity."));
        if let Some(username) = username {
            let player = self.store.player_by_name(username);
            self.push_event(player, text.to_string());
        }
    }
}
