use anyhow::{Context, Result};
use clap::Parser;
use futures_util::future::try_join_all;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;

mod calendar;
mod config;
mod liquipedia;
mod server;
mod tournaments;

use calendar::TournamentsCalendar;
use config::{Command, Config};
use liquipedia::LiquipediaClient;
use server::{AppState, TournamentCache};
use tournaments::{TournamentsApi, TracingReporter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let origin = Url::parse(&config.origin)?;
    let client = LiquipediaClient::new(
        &config.user_agent,
        Duration::from_secs(config.http_timeout_secs),
    )?;
    let reporter = Arc::new(TracingReporter::new());
    let api = TournamentsApi::new(Arc::new(client), reporter.clone(), origin);

    match config.command {
        Command::Serve {
            addr,
            cache_ttl_secs,
            default_game,
        } => {
            let state = AppState {
                api,
                cache: TournamentCache::new(Duration::from_secs(cache_ttl_secs)),
                reporter,
                default_game,
            };
            let app = server::router(state);
            let addr: SocketAddr = addr.parse()?;
            info!("Calendar feed listening on http://{}", addr);
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
        Command::Export { games, output } => {
            // games load concurrently; output keeps the requested order
            let batches = try_join_all(games.iter().map(|&game| {
                let api = &api;
                async move {
                    api.fetch_all(game)
                        .await
                        .with_context(|| format!("Failed to load {game} tournaments"))
                }
            }))
            .await?;
            let tournaments: Vec<_> = batches.into_iter().flatten().collect();
            info!("Loaded {} tournaments for {} game(s)", tournaments.len(), games.len());
            TournamentsCalendar::new(&tournaments).write_ics(&output)?;
            if reporter.failures() > 0 {
                info!("{} malformed rows were skipped", reporter.failures());
            }
        }
    }

    Ok(())
}
