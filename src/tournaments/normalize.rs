use url::Url;

use super::dates::parse_date_range;
use super::error::ValidationError;
use super::layout::Tier;
use super::models::{RawFields, Tournament, PLACEHOLDER};

/// Turn a row's raw text into a [`Tournament`], or explain why it can't be.
///
/// Trims every field, defaults blank prize/team count/location to
/// [`PLACEHOLDER`], parses the date range and resolves the link against
/// `origin`. Nothing is returned unless every step succeeds.
pub fn normalize(raw: RawFields, tier: Tier, origin: &Url) -> Result<Tournament, ValidationError> {
    let title = raw.title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let prize = or_placeholder(raw.prize.as_deref().unwrap_or_default());
    let team_count = or_placeholder(&raw.team_count);
    let location = or_placeholder(&raw.location);

    let (start, end) = parse_date_range(&raw.date)?;
    if end < start {
        return Err(ValidationError::DateOrder { start, end });
    }

    let href = raw.href.trim();
    let url = origin.join(href).map_err(|source| ValidationError::Url {
        href: href.to_string(),
        source,
    })?;

    Ok(Tournament::from_parts(
        title.to_string(),
        (start, end),
        prize,
        team_count,
        location,
        url,
        tier,
    ))
}

fn or_placeholder(text: &str) -> String {
    match text.trim() {
        "" => PLACEHOLDER.to_string(),
        trimmed => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournaments::error::{DateFormatError, LocateError};
    use chrono::NaiveDate;

    fn origin() -> Url {
        Url::parse("https://liquipedia.net").unwrap()
    }

    fn raw() -> RawFields {
        RawFields {
            title: "  IEM Katowice 2024 \n".into(),
            href: "/counterstrike/Intel_Extreme_Masters/2024/Katowice".into(),
            date: "Jan 31 - Feb 11, 2024".into(),
            prize: Some(" $1,000,000 ".into()),
            team_count: "24".into(),
            location: "\tKatowice, Poland ".into(),
        }
    }

    #[test]
    fn test_normalize_valid_row() {
        let t = normalize(raw(), Tier::S, &origin()).unwrap();
        assert_eq!(t.title(), "IEM Katowice 2024");
        assert_eq!(t.start_date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert_eq!(t.end_date(), NaiveDate::from_ymd_opt(2024, 2, 11).unwrap());
        assert_eq!(t.prize(), "$1,000,000");
        assert_eq!(t.team_count_description(), "24");
        assert_eq!(t.location(), "Katowice, Poland");
        assert_eq!(
            t.url().as_str(),
            "https://liquipedia.net/counterstrike/Intel_Extreme_Masters/2024/Katowice"
        );
        assert_eq!(t.tier(), Tier::S);
    }

    #[test]
    fn test_missing_prize_defaults_to_tba() {
        let mut r = raw();
        r.prize = None;
        assert_eq!(normalize(r, Tier::A, &origin()).unwrap().prize(), "TBA");
    }

    #[test]
    fn test_blank_fields_default_to_placeholder() {
        let mut r = raw();
        r.prize = Some("   ".into());
        r.team_count = String::new();
        r.location = "\n".into();
        let t = normalize(r, Tier::A, &origin()).unwrap();
        assert_eq!(t.prize(), PLACEHOLDER);
        assert_eq!(t.team_count_description(), PLACEHOLDER);
        assert_eq!(t.location(), PLACEHOLDER);
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut r = raw();
        r.title = " \n ".into();
        assert_eq!(normalize(r, Tier::S, &origin()), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_bad_date_surfaces_format_error() {
        let mut r = raw();
        r.date = "Q3 2024".into();
        assert_eq!(
            normalize(r, Tier::S, &origin()),
            Err(ValidationError::DateFormat(DateFormatError {
                text: "Q3 2024".into()
            }))
        );
    }

    #[test]
    fn test_year_rollover_breaks_date_order() {
        let mut r = raw();
        r.date = "Dec 28 - Jan 04, 2025".into();
        assert!(matches!(
            normalize(r, Tier::S, &origin()),
            Err(ValidationError::DateOrder { .. })
        ));
    }

    #[test]
    fn test_absolute_href_kept() {
        let mut r = raw();
        r.href = "https://example.com/event".into();
        let t = normalize(r, Tier::S, &origin()).unwrap();
        assert_eq!(t.url().as_str(), "https://example.com/event");
    }

    #[test]
    fn test_locate_error_converts() {
        let err: ValidationError = LocateError::NoTitleLink.into();
        assert_eq!(err.to_string(), "title cell has no link outside a styling wrapper");
    }
}
