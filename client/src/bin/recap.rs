//! recap - analyze Pokemon Showdown replays from the command line

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use recap_client::{ReplayClient, ReplayUrl};
use recap_protocol::tokenize;
use recap_replay::JsonDex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "recap")]
#[command(about = "Kill attribution, narrative and per-player stats for Pokemon Showdown replays")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a replay and print the result as JSON
    Analyze {
        /// Replay URL or path to a saved log file
        source: String,

        /// Showdown pokedex.json, used to resolve species ids
        #[arg(long)]
        pokedex: Option<PathBuf>,

        /// Showdown moves.json, used to recognise self-KO moves
        #[arg(long)]
        moves: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the tokenized log of a replay, one message per line
    Log {
        /// Replay URL or path to a saved log file
        source: String,
    },
}

async fn read_source(client: &ReplayClient, source: &str) -> Result<String> {
    if source.starts_with("https://") || source.starts_with("http://") {
        let url = ReplayUrl::parse(source)?;
        return client.fetch_log(&url).await;
    }
    tokio::fs::read_to_string(source)
        .await
        .with_context(|| format!("Failed to read log file {}", source))
}

async fn read_json(path: Option<&Path>) -> Result<Option<String>> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
            .map(Some),
        None => Ok(None),
    }
}

async fn load_dex(pokedex: Option<&Path>, moves: Option<&Path>) -> Result<Option<JsonDex>> {
    let pokedex = read_json(pokedex).await?;
    let moves = read_json(moves).await?;
    if pokedex.is_none() && moves.is_none() {
        return Ok(None);
    }

    let dex = JsonDex::from_json(
        pokedex.as_deref().unwrap_or("{}"),
        moves.as_deref().unwrap_or("{}"),
    )
    .context("Failed to load dex data")?;
    tracing::info!(species = dex.species_count(), "Loaded dex data");
    Ok(Some(dex))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("recap=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut client = ReplayClient::new()?;

    match cli.command {
        Command::Analyze {
            source,
            pokedex,
            moves,
            pretty,
        } => {
            if let Some(dex) = load_dex(pokedex.as_deref(), moves.as_deref()).await? {
                client = client.with_dex(dex);
            }
            let log = read_source(&client, &source).await?;
            let analysis = client.analyze_log(&log)?;

            let json = if pretty {
                serde_json::to_string_pretty(&analysis)?
            } else {
                serde_json::to_string(&analysis)?
            };
            println!("{}", json);
        }
        Command::Log { source } => {
            let log = read_source(&client, &source).await?;
            for message in tokenize(&log) {
                println!("{}", message);
            }
        }
    }

    Ok(())
}
