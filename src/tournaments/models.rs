use chrono::NaiveDate;
use serde::Serialize;
use url::Url;

use super::layout::Tier;

/// Shown when a listing leaves prize, team count or location blank.
pub const PLACEHOLDER: &str = "TBA";

/// Text pulled out of one table row, before any cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFields {
    pub title: String,
    /// `href` of the title link, usually site-relative.
    pub href: String,
    pub date: String,
    /// `None` when the row has no prize cell at all.
    pub prize: Option<String>,
    pub team_count: String,
    pub location: String,
}

/// A normalized tournament listing.
///
/// Only [`normalize`](super::normalize::normalize) builds these, so every
/// value has a non-empty title, an absolute URL and `start_date <= end_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tournament {
    title: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    prize: String,
    team_count_description: String,
    location: String,
    url: Url,
    tier: Tier,
}

impl Tournament {
    pub(super) fn from_parts(
        title: String,
        (start_date, end_date): (NaiveDate, NaiveDate),
        prize: String,
        team_count_description: String,
        location: String,
        url: Url,
        tier: Tier,
    ) -> Self {
        debug_assert!(start_date <= end_date);
        Tournament {
            title,
            start_date,
            end_date,
            prize,
            team_count_description,
            location,
            url,
            tier,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the tournament, inclusive.
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn prize(&self) -> &str {
        &self.prize
    }

    pub fn team_count_description(&self) -> &str {
        &self.team_count_description
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }
}
