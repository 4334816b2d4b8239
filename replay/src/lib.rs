//! Replay analysis engine for Pokemon Showdown battle logs.
//!
//! # Overview
//!
//! ```text
//! transcript ─► tokenize ─► Engine (dispatch + resolver) ─► aggregate ─► ReplayAnalysis
//!                              │
//!                              ▼
//!                         BattleStore
//! ```
//!
//! The pass is a single deterministic fold over the messages. Malformed
//! lines and references to pokemon the log never introduced are skipped, so
//! any transcript within the configured limits produces a result.
//!
//! # Example
//!
//! ```
//! use recap_replay::{StaticDex, analyze};
//!
//! let log = "|player|p1|Alice|\n|player|p2|Bob|\n|win|Alice";
//! let analysis = analyze(log, &StaticDex).unwrap();
//!
//! assert!(analysis.stats[0].win);
//! assert_eq!(analysis.events[0].message, "Alice wins the battle!");
//! ```

use recap_protocol::{Message, tokenize};
use tracing::debug;

pub mod aggregate;
pub mod config;
pub mod dex;
pub mod dispatch;
pub mod error;
pub mod narrative;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use aggregate::{ReplayAnalysis, aggregate};
pub use config::AnalyzerConfig;
pub use dex::{Dex, JsonDex, StaticDex};
pub use dispatch::Engine;
pub use error::AnalyzeError;
pub use narrative::Event;
pub use resolver::{FaintCause, LastMove};

/// Analyze a transcript with the default limits
pub fn analyze(transcript: &str, dex: &dyn Dex) -> Result<ReplayAnalysis, AnalyzeError> {
    analyze_with(transcript, dex, &AnalyzerConfig::default())
}

/// Analyze a transcript, rejecting it up front if it exceeds `config`
pub fn analyze_with(
    transcript: &str,
    dex: &dyn Dex,
    config: &AnalyzerConfig,
) -> Result<ReplayAnalysis, AnalyzeError> {
    config.check_bytes(transcript.len())?;
    let messages = tokenize(transcript);
    config.check_messages(messages.len())?;

    debug!(messages = messages.len(), "analyzing transcript");
    Ok(analyze_messages(&messages, dex))
}

/// Analyze already tokenized messages
pub fn analyze_messages(messages: &[Message], dex: &dyn Dex) -> ReplayAnalysis {
    let (store, events) = Engine::new(messages, dex).run();
    aggregate(store, events)
}
