//! Tokenizer and protocol value types for Pokemon Showdown battle logs.
//!
//! A replay log is a sequence of `|`-separated lines. [`tokenize`] turns the
//! raw transcript into [`Message`]s; each message exposes its [`Tag`], its
//! positional fields, and its bracketed [`Annotations`].

pub mod battle;
pub mod message;
pub mod tag;


pub use battle::{
    GameType, HpStatus, Player, Pokemon, PokemonDetails, Side, clean_effect, position_to_slot,
    to_id,
};
pub use message::{Annotations, Message, tokenize};
pub use tag::Tag;
