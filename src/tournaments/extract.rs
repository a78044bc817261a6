use scraper::ElementRef;

use super::error::{Field, LocateError};
use super::layout::{LayoutSelectors, Markers};
use super::models::RawFields;

/// Elements that only style their content. A link directly inside one is an
/// icon or badge, not the tournament name.
const STYLING_WRAPPERS: &[&str] = &["span"];

/// Pull the raw field text out of one row.
pub fn extract_row(row: ElementRef<'_>, layout: &LayoutSelectors) -> Result<RawFields, LocateError> {
    let title_cell = locate(row, layout.row_title, Field::Title)?;
    let (title, href) = title_link(title_cell)?;

    let date = text_of(locate(row, layout.row_date, Field::Date)?);
    let prize = locate_optional(row, layout.row_prize, Field::Prize)?.map(text_of);
    let team_count = text_of(locate(row, layout.row_team_count, Field::TeamCount)?);
    let location = text_of(locate(row, layout.row_location, Field::Location)?);

    Ok(RawFields {
        title,
        href,
        date,
        prize,
        team_count,
        location,
    })
}

fn locate<'a>(row: ElementRef<'a>, markers: Markers, field: Field) -> Result<ElementRef<'a>, LocateError> {
    locate_optional(row, markers, field)?.ok_or(LocateError::Missing(field))
}

fn locate_optional<'a>(
    row: ElementRef<'a>,
    markers: Markers,
    field: Field,
) -> Result<Option<ElementRef<'a>>, LocateError> {
    let mut found = markers.find_in(row);
    match found.len() {
        0 => Ok(None),
        1 => Ok(found.pop()),
        count => Err(LocateError::Ambiguous { field, count }),
    }
}

/// First link with an `href` whose parent is not a styling wrapper, in
/// document order. Returns its text and target.
fn title_link(cell: ElementRef<'_>) -> Result<(String, String), LocateError> {
    cell.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "a")
        .filter(|a| {
            a.parent()
                .and_then(ElementRef::wrap)
                .map_or(true, |p| !STYLING_WRAPPERS.contains(&p.value().name()))
        })
        .find_map(|a| {
            let href = a.value().attr("href")?;
            Some((text_of(a), href.to_string()))
        })
        .ok_or(LocateError::NoTitleLink)
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournaments::layout::{DIV_LAYOUT, GRID_LAYOUT};
    use scraper::Html;

    fn first_row<'a>(html: &'a Html, layout: &LayoutSelectors) -> ElementRef<'a> {
        layout.row.find_in(html.root_element())[0]
    }

    const GRID_ROW: &str = r#"
        <div class="gridRow">
          <div class="gridCell Tournament Header">
            <span class="league-icon-small-image"><a href="/counterstrike/BLAST" title="BLAST"><img src="x.png"></a></span>
            <a href="/counterstrike/BLAST/Premier/2024/World_Final">BLAST Premier World Final 2024</a>
          </div>
          <div class="gridCell EventDetails Date Header">Dec 18 - 22, 2024</div>
          <div class="gridCell EventDetails Prize Header">$1,000,000</div>
          <div class="gridCell EventDetails PlayerNumber Header"><span>8</span>&nbsp;teams</div>
          <div class="gridCell EventDetails Location Header"><span class="flag"></span>Singapore</div>
        </div>"#;

    #[test]
    fn test_extract_grid_row() {
        let html = Html::parse_fragment(GRID_ROW);
        let raw = extract_row(first_row(&html, &GRID_LAYOUT), &GRID_LAYOUT).unwrap();
        assert_eq!(raw.title, "BLAST Premier World Final 2024");
        assert_eq!(raw.href, "/counterstrike/BLAST/Premier/2024/World_Final");
        assert_eq!(raw.date, "Dec 18 - 22, 2024");
        assert_eq!(raw.prize.as_deref(), Some("$1,000,000"));
        assert_eq!(raw.team_count, "8\u{a0}teams");
        assert_eq!(raw.location, "Singapore");
    }

    /// The league icon link sits inside a `<span>` and must be skipped even
    /// though it comes first.
    #[test]
    fn test_title_skips_link_in_styling_wrapper() {
        let html = Html::parse_fragment(
            r#"<div class="gridRow"><div class="gridCell Tournament Header">
                 <span class="league-icon-small-image"><a href="/icon">Icon</a></span>
                 <a href="/main">Main Event</a>
                 <a href="/qualifier">Qualifier</a>
               </div></div>"#,
        );
        let cell = GRID_LAYOUT.row_title.find_in(html.root_element())[0];
        assert_eq!(
            title_link(cell).unwrap(),
            ("Main Event".to_string(), "/main".to_string())
        );
    }

    #[test]
    fn test_title_without_usable_link() {
        let html = Html::parse_fragment(
            r#"<div class="gridCell Tournament Header"><span><a href="/icon">x</a></span>Plain</div>"#,
        );
        let cell = GRID_LAYOUT.row_title.find_in(html.root_element())[0];
        assert_eq!(title_link(cell), Err(LocateError::NoTitleLink));
    }

    #[test]
    fn test_missing_prize_is_not_an_error() {
        let html = Html::parse_fragment(&GRID_ROW.replace("Prize", "Sponsor"));
        let raw = extract_row(first_row(&html, &GRID_LAYOUT), &GRID_LAYOUT).unwrap();
        assert_eq!(raw.prize, None);
    }

    #[test]
    fn test_missing_mandatory_field() {
        let html = Html::parse_fragment(&GRID_ROW.replace("Location", "Venue"));
        let err = extract_row(first_row(&html, &GRID_LAYOUT), &GRID_LAYOUT).unwrap_err();
        assert_eq!(err, LocateError::Missing(Field::Location));
    }

    #[test]
    fn test_duplicate_field_is_ambiguous() {
        let html = Html::parse_fragment(&GRID_ROW.replace(
            r#"<div class="gridCell EventDetails Date Header">"#,
            r#"<div class="gridCell EventDetails Date Header">Dec 01, 2024</div><div class="gridCell EventDetails Date Header">"#,
        ));
        let err = extract_row(first_row(&html, &GRID_LAYOUT), &GRID_LAYOUT).unwrap_err();
        assert_eq!(
            err,
            LocateError::Ambiguous {
                field: Field::Date,
                count: 2
            }
        );
    }

    /// Prize may be absent, but two prize cells are as unreadable as two dates.
    #[test]
    fn test_duplicate_prize_is_ambiguous() {
        let html = Html::parse_fragment(&GRID_ROW.replace(
            r#"<div class="gridCell EventDetails Prize Header">"#,
            r#"<div class="gridCell EventDetails Prize Header">$5,000</div><div class="gridCell EventDetails Prize Header">"#,
        ));
        let err = extract_row(first_row(&html, &GRID_LAYOUT), &GRID_LAYOUT).unwrap_err();
        assert_eq!(
            err,
            LocateError::Ambiguous {
                field: Field::Prize,
                count: 2
            }
        );
    }

    #[test]
    fn test_partial_marker_set_does_not_match() {
        // "Date" without "EventDetails" is not the date cell.
        let html = Html::parse_fragment(&GRID_ROW.replace("EventDetails Date", "Date"));
        let err = extract_row(first_row(&html, &GRID_LAYOUT), &GRID_LAYOUT).unwrap_err();
        assert_eq!(err, LocateError::Missing(Field::Date));
    }

    #[test]
    fn test_extract_div_row() {
        let html = Html::parse_fragment(
            r#"<div class="divRow">
                 <div class="divCell Tournament Header"><a href="/rocketleague/RLCS/2024/World_Championship">RLCS 2024 World Championship</a></div>
                 <div class="divCell EventDetails Date Header">Sep 10 - 15, 2024</div>
                 <div class="divCell EventDetails PlayerNumber Header">16</div>
                 <div class="divCell EventDetails Location Header">Fort Worth, TX</div>
               </div>"#,
        );
        let raw = extract_row(first_row(&html, &DIV_LAYOUT), &DIV_LAYOUT).unwrap();
        assert_eq!(raw.title, "RLCS 2024 World Championship");
        assert_eq!(raw.prize, None);
        assert_eq!(raw.location, "Fort Worth, TX");
    }
}
