//! iCalendar (RFC 5545) rendering of tournament batches.
//!
//! Every tournament becomes one all-day `VEVENT`. Tournament end dates are
//! inclusive while `DTEND` is exclusive, so the event ends the day after.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::info;

use crate::tournaments::Tournament;

const PRODID: &str = "-//tournament-calendar//Liquipedia tournaments//EN";
const CALENDAR_NAME: &str = "Esports tournaments";
/// Maximum octets per content line, excluding the CRLF.
const LINE_LIMIT: usize = 75;

pub struct TournamentsCalendar<'a> {
    tournaments: &'a [Tournament],
}

impl<'a> TournamentsCalendar<'a> {
    pub fn new(tournaments: &'a [Tournament]) -> Self {
        TournamentsCalendar { tournaments }
    }

    /// Render the calendar. `stamp` becomes every event's `DTSTAMP`.
    pub fn to_ics(&self, stamp: DateTime<Utc>) -> String {
        let stamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();
        let mut out = String::new();
        push_line(&mut out, "BEGIN:VCALENDAR");
        push_line(&mut out, "VERSION:2.0");
        push_line(&mut out, &format!("PRODID:{PRODID}"));
        push_line(&mut out, "CALSCALE:GREGORIAN");
        push_line(&mut out, "METHOD:PUBLISH");
        push_line(&mut out, &format!("X-WR-CALNAME:{}", escape_text(CALENDAR_NAME)));

        for t in self.tournaments {
            push_line(&mut out, "BEGIN:VEVENT");
            push_line(&mut out, &format!("UID:{}", uid(t)));
            push_line(&mut out, &format!("DTSTAMP:{stamp}"));
            push_line(&mut out, &format!("DTSTART;VALUE=DATE:{}", ics_date(t.start_date())));
            push_line(&mut out, &format!("DTEND;VALUE=DATE:{}", ics_date(exclusive_end(t.end_date()))));
            push_line(&mut out, &format!("SUMMARY:{}", escape_text(t.title())));
            push_line(&mut out, &format!("LOCATION:{}", escape_text(t.location())));
            push_line(&mut out, &format!("URL:{}", t.url()));
            push_line(&mut out, &format!("DESCRIPTION:{}", escape_text(&description(t))));
            push_line(&mut out, "END:VEVENT");
        }

        push_line(&mut out, "END:VCALENDAR");
        out
    }

    pub fn write_ics(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_ics(Utc::now()))
            .with_context(|| format!("Failed to write calendar to {}", path.display()))?;
        info!("Wrote {} events to {}", self.tournaments.len(), path.display());
        Ok(())
    }
}

fn description(t: &Tournament) -> String {
    format!(
        "Prize pool: {}\nTeams: {}\nTier: {}\n{}",
        t.prize(),
        t.team_count_description(),
        t.tier(),
        t.url()
    )
}

/// Stable across refreshes so calendar clients update events in place.
fn uid(t: &Tournament) -> String {
    let host = t.url().host_str().unwrap_or("tournament-calendar");
    let mut key = t.url().path().trim_matches('/').replace('/', "-");
    if let Some(query) = t.url().query() {
        key.push('?');
        key.push_str(query);
    }
    format!("{}-{}@{}", t.tier(), escape_text(&key), host)
}

fn ics_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn exclusive_end(end: NaiveDate) -> NaiveDate {
    end.checked_add_days(Days::new(1)).unwrap_or(end)
}

/// TEXT value escaping.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Append one content line, folded at [`LINE_LIMIT`] octets without
/// splitting a UTF-8 sequence.
fn push_line(out: &mut String, line: &str) {
    let mut width = 0;
    for c in line.chars() {
        if width + c.len_utf8() > LINE_LIMIT {
            out.push_str("\r\n ");
            // the leading space counts toward the continuation line
            width = 1;
        }
        out.push(c);
        width += c.len_utf8();
    }
    out.push_str("\r\n");
}
