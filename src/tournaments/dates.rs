//! Date-range notations used by tournament listings.
//!
//! Three forms are recognised, tried in order:
//!
//! * same day: `Feb 10, 2024`
//! * same month: `Jun 05 - 09, 2024`
//! * cross month: `May 27 - Jun 02, 2024`
//!
//! The year is always shared. A same-day listing yields `start == end`; the
//! range is inclusive on both ends.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use super::error::DateFormatError;

static SAME_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<m1>[A-Za-z]{3})\s+(?P<d1>\d{1,2}),\s*(?P<y>\d{4})$").unwrap()
});
static SAME_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<m1>[A-Za-z]{3})\s+(?P<d1>\d{1,2})\s*[-–]\s*(?P<d2>\d{1,2}),\s*(?P<y>\d{4})$")
        .unwrap()
});
static CROSS_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<m1>[A-Za-z]{3})\s+(?P<d1>\d{1,2})\s*[-–]\s*(?P<m2>[A-Za-z]{3})\s+(?P<d2>\d{1,2}),\s*(?P<y>\d{4})$",
    )
    .unwrap()
});

/// Parse a listing's date text into an inclusive `(start, end)` pair.
pub fn parse_date_range(text: &str) -> Result<(NaiveDate, NaiveDate), DateFormatError> {
    let cleaned = text.replace('\u{a0}', " ");
    let cleaned = cleaned.trim();
    let fail = || DateFormatError {
        text: text.to_string(),
    };

    if let Some(caps) = SAME_DAY.captures(cleaned) {
        let day = civil_date(&caps["m1"], &caps["d1"], &caps["y"]).ok_or_else(fail)?;
        return Ok((day, day));
    }
    if let Some(caps) = SAME_MONTH.captures(cleaned) {
        return range(&caps, "m1").ok_or_else(fail);
    }
    if let Some(caps) = CROSS_MONTH.captures(cleaned) {
        return range(&caps, "m2").ok_or_else(fail);
    }
    Err(fail())
}

fn range(caps: &Captures<'_>, end_month: &str) -> Option<(NaiveDate, NaiveDate)> {
    let start = civil_date(&caps["m1"], &caps["d1"], &caps["y"])?;
    let end = civil_date(&caps[end_month], &caps["d2"], &caps["y"])?;
    Some((start, end))
}

/// `None` for unknown month abbreviations and impossible days (`Feb 30`).
fn civil_date(month: &str, day: &str, year: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{month} {day} {year}"), "%b %d %Y").ok()
}
