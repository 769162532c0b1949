use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

/// Parses a strict ISO calendar date (`YYYY-MM-DD`), surrounding spaces allowed.
pub fn parse_iso_date(buf: &str) -> Result<NaiveDate, String> {
    lazy_static! {
        static ref ISO_DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    }

    let buf = buf.trim();
    if !ISO_DATE_REGEX.is_match(buf) {
        return Err(format!("Unable to parse date {}", buf));
    }

    NaiveDate::parse_from_str(buf, "%Y-%m-%d")
        .map_err(|e| format!("Unable to parse date {}: {}", buf, e))
}

/// Machine and human readable renditions of a date, e.g. `2025-12-14` and `December 14, 2025`.
pub fn format_date(date: &NaiveDate) -> (String, String) {
    let iso = date.format("%Y-%m-%d").to_string();
    let long = date.format("%B %-d, %Y").to_string();
    (iso, long)
}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
