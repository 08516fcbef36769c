use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

const DATE_INPUT_FORMAT: &str = "%Y %B %d %I:%M %p";
const DATE_OUTPUT_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Width of a formatted draw date, used to blank out missing dates.
pub const DATE_OUTPUT_WIDTH: usize = 16;

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][a-z]+) ([0-9]{1,2})[a-z]{2} ([0-9]{4})").unwrap());
static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{1,2}):([0-9]{2})([ap]m)").unwrap());

/// Parses text like `September 14th 2021 8:00pm` into a timestamp.
///
/// The date must lead the text; the time may appear anywhere after it.
/// Returns `None` when either part is missing or the combination is not a
/// real calendar date.
pub fn parse_draw_date(raw: &str) -> Option<NaiveDateTime> {
    let date = DATE_PATTERN.captures(raw)?;
    let time = TIME_PATTERN.captures(raw)?;

    let canonical = format!(
        "{} {} {} {}:{} {}",
        &date[3], &date[1], &date[2], &time[1], &time[2], &time[3]
    );
    NaiveDateTime::parse_from_str(&canonical, DATE_INPUT_FORMAT).ok()
}

pub fn format_draw_date(date: &NaiveDateTime) -> String {
    date.format(DATE_OUTPUT_FORMAT).to_string()
}
