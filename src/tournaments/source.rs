//! Drives discovery for a game: one fetch per tier page, then tables, rows,
//! extraction and normalization.
//!
//! A malformed row is logged, reported and dropped. Missing structure (no
//! tables, a table without rows, nothing at all for the game) fails the
//! whole request, since it means the page layout no longer matches the
//! selectors.

use std::sync::Arc;

use scraper::Html;
use tracing::{debug, info, warn};
use url::Url;

use super::error::{Discovery, SourceError, ValidationError};
use super::extract::extract_row;
use super::layout::{Game, LayoutSelectors, Tier};
use super::models::Tournament;
use super::normalize::normalize;
use super::provider::{FailureReporter, MarkupSource};

#[derive(Clone)]
pub struct TournamentsApi {
    source: Arc<dyn MarkupSource>,
    reporter: Arc<dyn FailureReporter>,
    origin: Url,
}

impl TournamentsApi {
    pub fn new(source: Arc<dyn MarkupSource>, reporter: Arc<dyn FailureReporter>, origin: Url) -> Self {
        TournamentsApi {
            source,
            reporter,
            origin,
        }
    }

    /// All tournaments listed for `game`, S-Tier first, then in page order.
    pub async fn fetch_all(&self, game: Game) -> Result<Vec<Tournament>, SourceError> {
        let config = game.source();
        let mut tournaments = Vec::new();

        for &(tier, path) in config.tiers {
            let url = self.origin.join(path).map_err(|source| SourceError::SourcePath {
                game,
                path: path.to_string(),
                source,
            })?;
            debug!("Fetching {} {} from {} via {}", game, tier, url, self.source.name());

            let markup = self.source.fetch(&url).await.map_err(|e| SourceError::Fetch {
                url: url.to_string(),
                source: e.into(),
            })?;

            let batch = scrape_tier(&markup, config.layout, tier, &self.origin, self.reporter.as_ref())
                .map_err(|what| SourceError::NoTournamentsFound { game, tier, what })?;
            info!("Parsed {} {} {} tournaments", batch.len(), game, tier);
            tournaments.extend(batch);
        }

        if tournaments.is_empty() {
            return Err(SourceError::EmptyBatch { game });
        }
        Ok(tournaments)
    }
}

/// Parse one tier page. Row failures go to `reporter`; structural gaps are
/// returned as the error.
pub fn scrape_tier(
    markup: &str,
    layout: &LayoutSelectors,
    tier: Tier,
    origin: &Url,
    reporter: &dyn FailureReporter,
) -> Result<Vec<Tournament>, Discovery> {
    let document = Html::parse_document(markup);
    let tables = layout.table.find_in(document.root_element());
    if tables.is_empty() {
        warn!("No {} tables matching {}", tier, layout.table);
        return Err(Discovery::Tables);
    }

    let mut tournaments = Vec::new();
    for table in tables {
        let rows = layout.row.find_in(table);
        if rows.is_empty() {
            warn!("{} table has no rows matching {}", tier, layout.row);
            return Err(Discovery::Rows);
        }
        for row in rows {
            let parsed = extract_row(row, layout)
                .map_err(ValidationError::from)
                .and_then(|raw| normalize(raw, tier, origin));
            match parsed {
                Ok(tournament) => tournaments.push(tournament),
                Err(e) => {
                    warn!("Dropping {} row: {}", tier, e);
                    reporter.report_parse_failure();
                }
            }
        }
    }
    Ok(tournaments)
}
