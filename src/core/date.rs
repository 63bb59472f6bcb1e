use std::fmt::Write;

use chrono::DateTime;

/// Default rendering for `Data_Emissao`.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Reformat an NF-e issue timestamp (`dhEmi`, RFC 3339 with UTC offset).
///
/// The calendar date is taken in the document's own offset. Anything that
/// does not parse, or a `format` chrono cannot render, yields `raw`
/// unchanged.
pub fn format_issue_date(raw: &str, format: &str) -> String {
    let Ok(dt) = DateTime::parse_from_rfc3339(raw.trim()) else {
        return raw.to_string();
    };
    let mut out = String::new();
    match write!(out, "{}", dt.format(format)) {
        Ok(()) => out,
        Err(_) => raw.to_string(),
    }
}
