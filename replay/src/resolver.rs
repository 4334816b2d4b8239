//! Attribution: who dealt the damage and who gets credit for a faint
//!
//! The log rarely says why something fainted. These functions work it out
//! from the preceding messages and the setters the store has recorded for
//! hazards, volatiles, statuses and weather.

use phf::phf_set;
use recap_battle::{BattleStore, MonRef};
use recap_protocol::{HpStatus, Message, Pokemon, Tag, clean_effect, to_id};
use tracing::debug;

use crate::dex::Dex;

/// Residual effects that damage their own user
static SELF_INFLICTED: phf::Set<&'static str> = phf_set! {
    "recoil",
    "lifeorb",
    "mindblown",
    "steelbeam",
    "chloroblast",
    "highjumpkick",
    "jumpkick",
    "struggle",
    "crash",
};

/// Statuses that deal residual damage
const DAMAGING_STATUS: [&str; 3] = ["psn", "tox", "brn"];

/// The most recent `move` message
#[derive(Debug, Clone, PartialEq)]
pub struct LastMove {
    /// Roster entry that used the move, if it resolved
    pub source: Option<MonRef>,
    pub source_ident: Pokemon,
    pub name: String,
    pub target: Option<Pokemon>,
    /// Index of the `move` message
    pub index: usize,
}

/// Why a pokemon fainted
#[derive(Debug, Clone, PartialEq)]
pub enum FaintCause {
    /// Knocked out by the attack that preceded the faint
    DirectKill { attacker: MonRef },
    /// Knocked out by an effect an opponent set up earlier
    IndirectKill { setter: MonRef, effect: String },
    /// Knocked out by its own move or item
    SelfKill { effect: String },
    Unknown { effect: Option<String> },
}

impl FaintCause {
    /// The entry credited with the kill, if any
    pub fn credited(&self) -> Option<MonRef> {
        match self {
            FaintCause::DirectKill { attacker } => Some(*attacker),
            FaintCause::IndirectKill { setter, .. } => Some(*setter),
            _ => None,
        }
    }
}

/// Read-only view the resolver works against
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub store: &'a BattleStore,
    pub dex: &'a dyn Dex,
    pub messages: &'a [Message],
}

/// Whether two idents name the same field position
fn same_position(a: &Pokemon, b: &Pokemon) -> bool {
    match (a.slot(), b.slot()) {
        (Some(x), Some(y)) => a.player == b.player && x == y,
        _ => a.player == b.player && a.name == b.name,
    }
}

/// Entry to credit with damage dealt by a plain (unannotated) hit.
///
/// Only the last move's user qualifies, and only when the move was not aimed
/// at its user and the damaged entry is someone else.
pub fn resolve_damage_source(last_move: Option<&LastMove>, damaged: MonRef) -> Option<MonRef> {
    let last = last_move?;
    let source = last.source?;

    if source == damaged {
        return None;
    }
    if last
        .target
        .as_ref()
        .is_some_and(|target| same_position(target, &last.source_ident))
    {
        return None;
    }
    Some(source)
}

/// Nearest earlier message that is a major action (non-empty tag without a
/// `-` prefix). Used to find the move or switch that caused a minor effect.
pub fn find_side_condition_parent(messages: &[Message], index: usize) -> Option<&Message> {
    let end = index.min(messages.len());
    messages[..end]
        .iter()
        .rev()
        .find(|m| !m.tag_str().is_empty() && !m.is_minor())
}

/// Attribute an effect named by a `[from]` annotation to whoever set it up.
///
/// Sources are tried in order: self-inflicted effects, the `[of]` pokemon,
/// side conditions on the victim's side, volatiles on the victim's position,
/// the victim's status setter, then the weather setter.
pub fn attribute_effect(
    ctx: ResolveContext<'_>,
    victim_ident: &Pokemon,
    victim: MonRef,
    raw_effect: &str,
    of: Option<&Pokemon>,
) -> FaintCause {
    let effect = clean_effect(raw_effect).to_string();
    let id = to_id(&effect);
    let store = ctx.store;

    if SELF_INFLICTED.contains(id.as_str()) {
        return FaintCause::SelfKill { effect };
    }

    let setter = of
        .and_then(|p| store.resolve(p))
        .filter(|mon| *mon != victim)
        .or_else(|| {
            store
                .side_condition(victim.player, &effect)
                .and_then(|c| c.setter)
        })
        .or_else(|| {
            store
                .volatile(victim_ident, &effect)
                .and_then(|v| v.setter)
        })
        .or_else(|| {
            if !DAMAGING_STATUS.contains(&id.as_str()) {
                return None;
            }
            store
                .record(victim)
                .and_then(|r| r.status.as_ref())
                .and_then(|s| s.setter)
        })
        .or_else(|| {
            store
                .weather()
                .filter(|w| w.matches(&effect))
                .and_then(|w| w.setter)
        });

    match setter {
        Some(setter) if setter.opposes(victim) => FaintCause::IndirectKill { setter, effect },
        Some(setter) if setter == victim => FaintCause::SelfKill { effect },
        _ => FaintCause::Unknown {
            effect: Some(effect),
        },
    }
}

/// Whether a message is a `-damage` that left this pokemon at 0. The name
/// must match too, since a replacement can hold the same position.
fn is_fatal_damage_to(message: &Message, ident: &Pokemon) -> bool {
    if message.tag() != Some(Tag::Damage) {
        return false;
    }
    let Some(target) = message.pokemon(1) else {
        return false;
    };
    if !same_position(&target, ident) || target.name != ident.name {
        return false;
    }
    // HP that does not parse does not rule the message out
    message
        .field(2)
        .and_then(HpStatus::parse)
        .is_none_or(|hp| hp.is_fainted() || hp.current == 0)
}

/// Messages that may sit between a hit and the faint it caused
fn within_action(message: &Message) -> bool {
    message.is_minor() || message.tag_str().is_empty() || message.tag() == Some(Tag::Faint)
}

/// Find the damage message that knocked out `ident`.
///
/// Checks the last-damage pointer first, then scans back through the
/// current action for spread moves and simultaneous residuals. The pointer
/// only counts while it is inside the current action.
pub fn find_fatal_damage(
    messages: &[Message],
    faint_index: usize,
    last_damage: Option<usize>,
    ident: &Pokemon,
) -> Option<usize> {
    if let Some(index) = last_damage
        && index < faint_index
        && faint_index <= messages.len()
        && is_fatal_damage_to(&messages[index], ident)
        && messages[index + 1..faint_index].iter().all(within_action)
    {
        return Some(index);
    }

    let end = faint_index.min(messages.len());
    for index in (0..end).rev() {
        let message = &messages[index];
        if is_fatal_damage_to(message, ident) {
            return Some(index);
        }
        if !within_action(message) {
            break;
        }
    }
    None
}

/// Destiny Bond activation in the current action, if any
fn find_destiny_bond(messages: &[Message], faint_index: usize) -> Option<Pokemon> {
    let end = faint_index.min(messages.len());
    for message in messages[..end].iter().rev() {
        if message.tag() == Some(Tag::Activate)
            && message
                .field(2)
                .is_some_and(|effect| to_id(clean_effect(effect)) == "destinybond")
        {
            return message.pokemon(1);
        }
        if !within_action(message) {
            break;
        }
    }
    None
}

/// Work out why the pokemon at `ident` fainted
pub fn resolve_faint_cause(
    ctx: ResolveContext<'_>,
    ident: &Pokemon,
    faint_index: usize,
    last_damage: Option<usize>,
    last_move: Option<&LastMove>,
) -> FaintCause {
    let Some(victim) = ctx.store.resolve(ident) else {
        debug!(name = %ident.name, "faint of untracked pokemon");
        return FaintCause::Unknown { effect: None };
    };

    if let Some(index) = find_fatal_damage(ctx.messages, faint_index, last_damage, ident) {
        let damage = &ctx.messages[index];
        let annotations = damage.annotations();

        return match annotations.from.as_deref() {
            None => match last_move.and_then(|m| m.source) {
                Some(attacker) if attacker.opposes(victim) => FaintCause::DirectKill { attacker },
                _ => FaintCause::Unknown {
                    effect: last_move.map(|m| m.name.clone()),
                },
            },
            Some(effect) => attribute_effect(
                ctx,
                ident,
                victim,
                effect,
                annotations.of_pokemon().as_ref(),
            ),
        };
    }

    if let Some(last) = last_move
        && last.source == Some(victim)
        && ctx.dex.is_self_ko(&last.name)
    {
        return FaintCause::SelfKill {
            effect: last.name.clone(),
        };
    }

    if let Some(bonder) = find_destiny_bond(ctx.messages, faint_index)
        && let Some(setter) = ctx.store.resolve(&bonder)
        && setter.opposes(victim)
    {
        return FaintCause::IndirectKill {
            setter,
            effect: "Destiny Bond".to_string(),
        };
    }

    FaintCause::Unknown { effect: None }
}
