//! Fetching Pokemon Showdown replays and feeding them to the analysis engine.
//!
//! ```no_run
//! use recap_client::{ReplayClient, ReplayUrl};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = ReplayClient::new()?;
//! let url = ReplayUrl::parse("https://replay.pokemonshowdown.com/gen9ou-2012345678")?;
//! let analysis = client.analyze(&url).await?;
//! println!("{} turns", analysis.turns);
//! # Ok(())
//! # }
//! ```

mod connection;
mod url;

use anyhow::{Context, Result};
use connection::Connection;
use recap_replay::{Dex, ReplayAnalysis, StaticDex};

pub use connection::{ClientConfig, RetryPolicy};
pub use url::{ClientError, REPLAY_HOST, ReplayUrl};

/// Downloads replay logs and runs them through the analyzer
pub struct ReplayClient {
    connection: Connection,
    dex: Box<dyn Dex + Send + Sync>,
}

impl ReplayClient {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            connection: Connection::new(&config)?,
            dex: Box::new(StaticDex),
        })
    }

    /// Use a different metadata source for analysis
    pub fn with_dex(mut self, dex: impl Dex + Send + Sync + 'static) -> Self {
        self.dex = Box::new(dex);
        self
    }

    /// Download the raw log of a replay
    pub async fn fetch_log(&self, url: &ReplayUrl) -> Result<String> {
        tracing::info!(replay = %url, "Fetching replay log");
        let log = self.connection.fetch_log(url).await?;
        tracing::info!(replay = %url, bytes = log.len(), "Fetched replay log");
        Ok(log)
    }

    /// Download and analyze a replay
    pub async fn analyze(&self, url: &ReplayUrl) -> Result<ReplayAnalysis> {
        let log = self.fetch_log(url).await?;
        self.analyze_log(&log)
            .with_context(|| format!("Failed to analyze {}", url))
    }

    /// Analyze a log that is already in memory
    pub fn analyze_log(&self, log: &str) -> Result<ReplayAnalysis> {
        Ok(recap_replay::analyze(log, self.dex.as_ref())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_log_in_memory() {
        let client = ReplayClient::new().unwrap();
        let analysis = client
            .analyze_log("|player|p1|Alice|\n|player|p2|Bob|\n|win|Bob")
            .unwrap();
        assert!(analysis.stats[1].win);
    }
}
