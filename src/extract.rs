use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

use crate::types::{Draw, Extraction};
use crate::utils::parse_draw_date;

/// Number of ball values in a complete draw: six main numbers plus the bonus.
pub const BALLS_PER_DRAW: usize = 7;

static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static DATE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("th a").unwrap());
static BALL: Lazy<Selector> = Lazy::new(|| Selector::parse("td ul li").unwrap());

/// Where to look for draw rows.
#[derive(Debug, Clone, Default)]
pub struct RowScope {
    table: Option<Selector>,
}

impl RowScope {
    pub fn new(table_selector: Option<&str>) -> Result<Self> {
        let table = table_selector
            .map(|s| {
                Selector::parse(s).map_err(|e| anyhow!("invalid table selector {:?}: {:?}", s, e))
            })
            .transpose()?;
        Ok(RowScope { table })
    }

    fn rows<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        let Some(table) = &self.table else {
            return document.select(&ROW).collect();
        };

        // Nested matches would otherwise yield the same row twice.
        let mut seen = HashSet::new();
        document
            .select(table)
            .flat_map(|t| t.select(&ROW))
            .filter(|row| seen.insert(row.id()))
            .collect()
    }
}

enum Row {
    Draw(Draw),
    MissingDate,
    WrongBallCount(usize),
}

/// Text nodes joined by single spaces, so `<br>` or adjacent spans keep words apart.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when `row` is the nearest enclosing `tr` of `element`.
fn belongs_to(row: ElementRef<'_>, element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|a| a.value().name() == "tr")
        .is_some_and(|tr| tr.id() == row.id())
}

/// Walks every candidate row in document order and keeps the complete draws.
pub fn extract_draws(document: &Html, scope: &RowScope) -> Extraction {
    let mut extraction = Extraction::default();

    for (index, row) in scope.rows(document).into_iter().enumerate() {
        extraction.stats.rows_seen += 1;
        match read_row(row, &mut extraction) {
            Row::Draw(draw) => {
                if draw.date.is_none() {
                    extraction.stats.unparsed_dates += 1;
                }
                extraction.draws.push(draw);
            }
            Row::MissingDate => {
                extraction.stats.missing_date += 1;
                tracing::debug!("row {}: no date link, skipped", index);
            }
            Row::WrongBallCount(count) => {
                extraction.stats.wrong_ball_count += 1;
                tracing::debug!(
                    "row {}: {} numeric balls instead of {}, skipped",
                    index,
                    count,
                    BALLS_PER_DRAW
                );
            }
        }
    }

    extraction
}

fn read_row(row: ElementRef<'_>, extraction: &mut Extraction) -> Row {
    let Some(raw_date) = row
        .select(&DATE_LINK)
        .find(|link| belongs_to(row, link))
        .map(element_text)
    else {
        return Row::MissingDate;
    };

    let mut balls = Vec::with_capacity(BALLS_PER_DRAW);
    let values = row
        .select(&BALL)
        .filter(|ball| belongs_to(row, ball))
        .map(element_text);
    for value in values {
        match value.parse::<u32>() {
            Ok(n) => balls.push(n),
            Err(_) => extraction.stats.dropped_values += 1,
        }
    }

    let date = parse_draw_date(&raw_date);
    if date.is_none() {
        tracing::debug!("unrecognised draw date {:?}", raw_date);
    }

    match Draw::from_balls(date, &balls) {
        Some(draw) => Row::Draw(draw),
        None => Row::WrongBallCount(balls.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::format_draw_date;

    fn row(date: &str, balls: &[&str]) -> String {
        let items: String = balls.iter().map(|b| format!("<li>{}</li>", b)).collect();
        format!(
            "<tr><th><a href=\"/draw\">{}</a></th><td><ul>{}</ul></td></tr>",
            date, items
        )
    }

    fn page(rows: &[String]) -> Html {
        Html::parse_document(&format!(
            "<html><body><table id=\"results\">{}</table></body></html>",
            rows.concat()
        ))
    }

    const BALLS: [&str; 7] = ["3", "17", "22", "28", "35", "41", "9"];

    #[test]
    fn complete_row_becomes_a_draw() {
        let doc = page(&[row("September 14th 2021 8:00pm", &BALLS)]);
        let extraction = extract_draws(&doc, &RowScope::default());

        assert_eq!(extraction.draws.len(), 1);
        let draw = &extraction.draws[0];
        assert_eq!(draw.numbers, [3, 17, 22, 28, 35, 41]);
        assert_eq!(draw.bonus, 9);
        assert_eq!(
            draw.date.map(|d| format_draw_date(&d)).as_deref(),
            Some("14.09.2021 20:00")
        );
        assert_eq!(extraction.stats.skipped(), 0);
    }

    #[test]
    fn rows_without_seven_balls_are_skipped() {
        let doc = page(&[
            row("September 14th 2021 8:00pm", &BALLS[..6]),
            row("September 13th 2021 8:00pm", &["1", "2", "3", "4", "5", "6", "7", "8"]),
            row("September 12th 2021 8:00pm", &[]),
        ]);
        let extraction = extract_draws(&doc, &RowScope::default());

        assert!(extraction.draws.is_empty());
        assert_eq!(extraction.stats.rows_seen, 3);
        assert_eq!(extraction.stats.wrong_ball_count, 3);
    }

    #[test]
    fn rows_without_date_link_are_skipped() {
        let header = "<tr><th>Date</th><th>Numbers</th></tr>".to_string();
        let no_link = "<tr><th>September 14th 2021 8:00pm</th><td><ul><li>1</li><li>2</li>\
                       <li>3</li><li>4</li><li>5</li><li>6</li><li>7</li></ul></td></tr>"
            .to_string();
        let doc = page(&[header, no_link]);
        let extraction = extract_draws(&doc, &RowScope::default());

        assert!(extraction.draws.is_empty());
        assert_eq!(extraction.stats.missing_date, 2);
    }

    #[test]
    fn non_numeric_balls_are_dropped_before_counting() {
        let mut balls = BALLS.to_vec();
        balls.insert(3, "Bonus");
        balls.push("");
        let doc = page(&[row("September 14th 2021 8:00pm", &balls)]);
        let extraction = extract_draws(&doc, &RowScope::default());

        assert_eq!(extraction.draws.len(), 1);
        assert_eq!(extraction.draws[0].numbers, [3, 17, 22, 28, 35, 41]);
        assert_eq!(extraction.stats.dropped_values, 2);
    }

    #[test]
    fn whitespace_around_values_is_ignored() {
        let balls = [" 3 ", "\n17", "22", "28", "35", "41", " 9\n"];
        let doc = page(&[row("  September 14th 2021 8:00pm\n", &balls)]);
        let extraction = extract_draws(&doc, &RowScope::default());

        assert_eq!(extraction.draws.len(), 1);
        assert!(extraction.draws[0].date.is_some());
    }

    #[test]
    fn unparsable_date_keeps_the_draw_without_timestamp() {
        let doc = page(&[row("Latest result", &BALLS)]);
        let extraction = extract_draws(&doc, &RowScope::default());

        assert_eq!(extraction.draws.len(), 1);
        assert_eq!(extraction.draws[0].date, None);
        assert_eq!(extraction.stats.unparsed_dates, 1);
    }

    #[test]
    fn draws_keep_document_order() {
        let doc = page(&[
            row("September 14th 2021 8:00pm", &BALLS),
            row("September 13th 2021 8:00pm", &["1", "2", "3", "4", "5", "6", "7"]),
        ]);
        let extraction = extract_draws(&doc, &RowScope::default());

        let bonuses: Vec<u32> = extraction.draws.iter().map(|d| d.bonus).collect();
        assert_eq!(bonuses, vec![9, 7]);
    }

    #[test]
    fn table_scope_excludes_other_tables() {
        let html = format!(
            "<table id=\"other\">{}</table><table id=\"results\">{}</table>",
            row("January 1st 2020 8:00pm", &["1", "2", "3", "4", "5", "6", "7"]),
            row("September 14th 2021 8:00pm", &BALLS),
        );
        let doc = Html::parse_document(&html);

        let everything = extract_draws(&doc, &RowScope::default());
        assert_eq!(everything.draws.len(), 2);

        let scoped = extract_draws(&doc, &RowScope::new(Some("table#results")).unwrap());
        assert_eq!(scoped.draws.len(), 1);
        assert_eq!(scoped.draws[0].bonus, 9);
    }

    #[test]
    fn nested_scope_matches_do_not_duplicate_rows() {
        let html = format!(
            "<div class=\"archive\"><div class=\"archive\"><table>{}</table></div></div>",
            row("September 14th 2021 8:00pm", &BALLS)
        );
        let doc = Html::parse_document(&html);
        let scoped = extract_draws(&doc, &RowScope::new(Some("div.archive")).unwrap());
        assert_eq!(scoped.draws.len(), 1);
    }

    #[test]
    fn date_link_split_by_markup_keeps_its_date() {
        let doc = page(&[
            row("September 14th 2021<br>8:00pm", &BALLS),
            row("<span>September 13th 2021</span><span>2:00pm</span>", &BALLS),
        ]);
        let extraction = extract_draws(&doc, &RowScope::default());

        let dates: Vec<Option<String>> = extraction
            .draws
            .iter()
            .map(|d| d.date.map(|d| format_draw_date(&d)))
            .collect();
        assert_eq!(
            dates,
            vec![
                Some("14.09.2021 20:00".to_string()),
                Some("13.09.2021 14:00".to_string())
            ]
        );
        assert_eq!(extraction.stats.unparsed_dates, 0);
    }

    #[test]
    fn layout_row_wrapping_a_results_table_is_not_a_second_draw() {
        let html = format!(
            "<table><tr><td><table>{}</table></td></tr></table>",
            row("September 14th 2021 8:00pm", &BALLS)
        );
        let doc = Html::parse_document(&html);
        let extraction = extract_draws(&doc, &RowScope::default());

        assert_eq!(extraction.draws.len(), 1);
        assert_eq!(extraction.draws[0].bonus, 9);
        assert_eq!(extraction.stats.rows_seen, 2);
        assert_eq!(extraction.stats.missing_date, 1);
    }

    #[test]
    fn invalid_scope_selector_is_an_error() {
        assert!(RowScope::new(Some("table[")).is_err());
    }
}
