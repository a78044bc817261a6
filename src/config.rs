use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::tournaments::{Game, LIQUIPEDIA_ORIGIN};

/// Esports tournament calendar built from Liquipedia listings
#[derive(Parser, Debug, Clone)]
#[command(name = "tournament-calendar", version, about)]
pub struct Config {
    /// Origin that tier pages and tournament links are resolved against
    #[arg(long, env = "LIQUIPEDIA_ORIGIN", default_value = LIQUIPEDIA_ORIGIN, global = true)]
    pub origin: String,

    /// User-Agent sent to Liquipedia (their terms ask for contact details)
    #[arg(
        long,
        env = "USER_AGENT",
        default_value = concat!("tournament-calendar/", env!("CARGO_PKG_VERSION")),
        global = true
    )]
    pub user_agent: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "10", global = true)]
    pub http_timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve calendars over HTTP
    Serve {
        /// Listen address
        #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
        addr: String,

        /// Width of a cache window in seconds
        #[arg(long, env = "CACHE_TTL_SECS", default_value = "3600")]
        cache_ttl_secs: u64,

        /// Game served at `/`
        #[arg(long, env = "DEFAULT_GAME", default_value = "counterstrike")]
        default_game: Game,
    },
    /// Write one calendar file and exit
    Export {
        /// Games to include, in order (repeatable)
        #[arg(long = "game", default_value = "counterstrike")]
        games: Vec<Game>,

        /// Output path
        #[arg(long, short, default_value = "tournaments.ics")]
        output: PathBuf,
    },
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        let origin = url::Url::parse(&self.origin)
            .map_err(|e| anyhow::anyhow!("origin {:?} is not a valid URL: {}", self.origin, e))?;
        if origin.cannot_be_a_base() {
            anyhow::bail!("origin {:?} cannot be used as a base URL", self.origin);
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("http_timeout_secs must be positive");
        }
        if self.user_agent.trim().is_empty() {
            anyhow::bail!("user_agent must not be empty");
        }
        match &self.command {
            Command::Serve { cache_ttl_secs, .. } if *cache_ttl_secs == 0 => {
                anyhow::bail!("cache_ttl_secs must be positive")
            }
            Command::Export { games, .. } if games.is_empty() => {
                anyhow::bail!("at least one --game is required")
            }
            _ => {}
        }
        Ok(())
    }
}
