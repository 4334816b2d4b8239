//! Replay URL validation

use reqwest::Url;
use thiserror::Error;

/// Host serving public replays
pub const REPLAY_HOST: &str = "replay.pokemonshowdown.com";

#[derive(Error, Debug, PartialEq)]
pub enum ClientError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Not a replay URL: expected host replay.pokemonshowdown.com, got {0}")]
    WrongHost(String),

    #[error("Invalid replay id: {0}")]
    InvalidReplayId(String),
}

/// A validated replay location, e.g. `https://replay.pokemonshowdown.com/gen9ou-2012345678`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayUrl {
    id: String,
}

impl ReplayUrl {
    /// Accepts the replay page URL with an optional `.log`/`.json` suffix
    /// and query string
    pub fn parse(input: &str) -> Result<Self, ClientError> {
        let url = Url::parse(input.trim()).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        if url.scheme() != "https" {
            return Err(ClientError::UnsupportedScheme(url.scheme().to_string()));
        }

        let host = url.host_str().unwrap_or_default();
        if host != REPLAY_HOST {
            return Err(ClientError::WrongHost(host.to_string()));
        }

        let path = url.path().trim_start_matches('/');
        let id = path
            .strip_suffix(".log")
            .or_else(|| path.strip_suffix(".json"))
            .unwrap_or(path);

        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(ClientError::InvalidReplayId(path.to_string()));
        }

        Ok(Self { id: id.to_string() })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Location of the raw battle log
    pub fn log_url(&self) -> String {
        format!("https://{REPLAY_HOST}/{}.log", self.id)
    }
}

impl std::fmt::Display for ReplayUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "https://{REPLAY_HOST}/{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay_url() {
        let url = ReplayUrl::parse("https://replay.pokemonshowdown.com/gen9ou-2012345678").unwrap();
        assert_eq!(url.id(), "gen9ou-2012345678");
        assert_eq!(
            url.log_url(),
            "https://replay.pokemonshowdown.com/gen9ou-2012345678.log"
        );
    }

    #[test]
    fn test_parse_suffix_and_query() {
        let log = ReplayUrl::parse("https://replay.pokemonshowdown.com/gen9ou-1.log").unwrap();
        let json = ReplayUrl::parse("https://replay.pokemonshowdown.com/gen9ou-1.json").unwrap();
        let query = ReplayUrl::parse("https://replay.pokemonshowdown.com/gen9ou-1?p2").unwrap();
        assert_eq!(log, json);
        assert_eq!(log, query);
        assert_eq!(log.to_string(), "https://replay.pokemonshowdown.com/gen9ou-1");
    }

    #[test]
    fn test_reject_other_hosts() {
        assert_eq!(
            ReplayUrl::parse("https://example.com/gen9ou-1"),
            Err(ClientError::WrongHost("example.com".to_string()))
        );
        assert_eq!(
            ReplayUrl::parse("http://replay.pokemonshowdown.com/gen9ou-1"),
            Err(ClientError::UnsupportedScheme("http".to_string()))
        );
        assert!(matches!(
            ReplayUrl::parse("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_reject_bad_ids() {
        for input in [
            "https://replay.pokemonshowdown.com/",
            "https://replay.pokemonshowdown.com/a/b",
            "https://replay.pokemonshowdown.com/.log",
        ] {
            assert!(
                matches!(ReplayUrl::parse(input), Err(ClientError::InvalidReplayId(_))),
                "{input}"
            );
        }
    }
}
