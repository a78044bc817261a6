//! In-memory, time-bucketed cache of tournament batches.
//!
//! Time is cut into fixed windows of `ttl` seconds since the Unix epoch. A
//! batch fetched in one window is served for every request in that window;
//! the first request in a new window refreshes it. Failed refreshes are
//! never stored.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::tournaments::{Game, SourceError, Tournament};

#[derive(Debug, Clone)]
pub struct CachedBatch {
    pub bucket: i64,
    pub fetched_at: DateTime<Utc>,
    pub tournaments: Arc<Vec<Tournament>>,
}

#[derive(Clone)]
pub struct TournamentCache {
    inner: Arc<RwLock<HashMap<Game, CachedBatch>>>,
    ttl_secs: i64,
}

impl TournamentCache {
    pub fn new(ttl: Duration) -> Self {
        TournamentCache {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl_secs: ttl.as_secs().max(1) as i64,
        }
    }

    pub fn bucket_of(&self, at: DateTime<Utc>) -> i64 {
        at.timestamp().div_euclid(self.ttl_secs)
    }

    /// The batch for `game` if it was fetched in the same window as `now`.
    pub async fn get(&self, game: Game, now: DateTime<Utc>) -> Option<CachedBatch> {
        let bucket = self.bucket_of(now);
        let inner = self.inner.read().await;
        inner.get(&game).filter(|b| b.bucket == bucket).cloned()
    }

    /// Serve from the current window, or run `refresh` and store its result.
    pub async fn get_or_refresh<F, Fut>(
        &self,
        game: Game,
        now: DateTime<Utc>,
        refresh: F,
    ) -> Result<CachedBatch, SourceError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Tournament>, SourceError>>,
    {
        if let Some(hit) = self.get(game, now).await {
            debug!("Cache hit for {} (bucket {})", game, hit.bucket);
            return Ok(hit);
        }

        // fetch without holding the lock
        let tournaments = refresh().await?;
        let batch = CachedBatch {
            bucket: self.bucket_of(now),
            fetched_at: now,
            tournaments: Arc::new(tournaments),
        };
        self.inner.write().await.insert(game, batch.clone());
        debug!("Cached {} {} tournaments (bucket {})", batch.tournaments.len(), game, batch.bucket);
        Ok(batch)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
