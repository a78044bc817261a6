use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use super::layout::{Game, Tier};

/// A logical field of a tournament row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Date,
    Prize,
    TeamCount,
    Location,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Date => "date",
            Field::Prize => "prize",
            Field::TeamCount => "team count",
            Field::Location => "location",
        };
        f.write_str(name)
    }
}

/// The date text matched none of the recognised notations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised date range {text:?}")]
pub struct DateFormatError {
    pub text: String,
}

/// A field selector did not resolve to exactly one element in a row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("no element matched the {0} selector")]
    Missing(Field),
    #[error("{count} elements matched the {field} selector")]
    Ambiguous { field: Field, count: usize },
    #[error("title cell has no link outside a styling wrapper")]
    NoTitleLink,
}

/// Why a single row could not become a [`Tournament`](super::Tournament).
///
/// Row-level: the orchestrator reports it and drops the row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error(transparent)]
    DateFormat(#[from] DateFormatError),
    #[error("tournament title is empty")]
    EmptyTitle,
    #[error("date range ends ({end}) before it starts ({start})")]
    DateOrder { start: NaiveDate, end: NaiveDate },
    #[error("cannot resolve tournament link {href:?}: {source}")]
    Url {
        href: String,
        #[source]
        source: url::ParseError,
    },
}

/// What structural element was missing when discovery came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    Tables,
    Rows,
}

impl fmt::Display for Discovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discovery::Tables => f.write_str("no tournament tables"),
            Discovery::Rows => f.write_str("a tournament table without rows"),
        }
    }
}

/// Request-level failures. Any of these aborts the whole batch.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{game} {tier}: found {what}; the page layout has probably changed")]
    NoTournamentsFound {
        game: Game,
        tier: Tier,
        what: Discovery,
    },
    #[error("{game}: no tournament could be parsed from any tier")]
    EmptyBatch { game: Game },
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("invalid source path {path:?} for {game}: {source}")]
    SourcePath {
        game: Game,
        path: String,
        #[source]
        source: url::ParseError,
    },
}

impl SourceError {
    /// Structural discovery failures, as opposed to transport problems.
    pub fn is_layout_drift(&self) -> bool {
        matches!(
            self,
            SourceError::NoTournamentsFound { .. } | SourceError::EmptyBatch { .. }
        )
    }
}
