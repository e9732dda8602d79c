use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Placeholder shown for an episode without a `pubDate`.
pub const UNKNOWN_DATE: &str = "Unknown";

/// Formats a raw `pubDate` for display as e.g. `Jan 1, 2024`.
///
/// Accepts RFC 2822 (the usual podcast form), RFC 3339, `YYYY-MM-DD` and
/// `YYYY-MM-DDTHH:MM:SS`. Zoned dates keep their own offset's calendar day.
/// An empty value gives [`UNKNOWN_DATE`]; anything unparseable is returned
/// unchanged.
///
/// ```
/// use podview::util::format_release_date;
///
/// assert_eq!(format_release_date("Tue, 02 Jan 2024 08:00:00 GMT"), "Jan 2, 2024");
/// assert_eq!(format_release_date(""), "Unknown");
/// assert_eq!(format_release_date("someday"), "someday");
/// ```
pub fn format_release_date(raw: &str) -> String {
    if raw.is_empty() {
        return UNKNOWN_DATE.to_string();
    }
    match parse_release_date(raw.trim()) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

fn parse_release_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .ok()
}

/// Formats elapsed seconds as `HH:MM:SS`.
///
/// Only the leading digits of `raw` are read, so `"125.7"` is 125 seconds.
/// Hours are not capped. Returns `None` when there are no leading digits.
///
/// ```
/// use podview::util::format_progress;
///
/// assert_eq!(format_progress("125").as_deref(), Some("00:02:05"));
/// assert_eq!(format_progress("abc"), None);
/// ```
pub fn format_progress(raw: &str) -> Option<String> {
    let trimmed = raw.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let total: u64 = trimmed[..end].parse().ok()?;

    Some(format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc2822_dates() {
        assert_eq!(
            format_release_date("Mon, 01 Jan 2024 10:00:00 +0000"),
            "Jan 1, 2024"
        );
        assert_eq!(
            format_release_date("Fri, 15 Mar 2019 23:30:00 -0700"),
            "Mar 15, 2019"
        );
    }

    #[test]
    fn test_iso_dates() {
        assert_eq!(format_release_date("2024-01-01"), "Jan 1, 2024");
        assert_eq!(format_release_date("2023-12-31T22:15:00Z"), "Dec 31, 2023");
        assert_eq!(format_release_date("2023-07-04T09:00:00"), "Jul 4, 2023");
    }

    #[test]
    fn test_surrounding_whitespace_tolerated() {
        assert_eq!(format_release_date("  2024-02-29 "), "Feb 29, 2024");
    }

    #[test]
    fn test_unparseable_date_passes_through() {
        assert_eq!(format_release_date("last week"), "last week");
        assert_eq!(format_release_date("2024-13-01"), "2024-13-01");
    }

    #[test]
    fn test_empty_date_is_unknown() {
        assert_eq!(format_release_date(""), UNKNOWN_DATE);
    }

    #[test]
    fn test_progress_formatting() {
        assert_eq!(format_progress("0").as_deref(), Some("00:00:00"));
        assert_eq!(format_progress("59").as_deref(), Some("00:00:59"));
        assert_eq!(format_progress("3661").as_deref(), Some("01:01:01"));
        assert_eq!(format_progress("360000").as_deref(), Some("100:00:00"));
    }

    #[test]
    fn test_progress_reads_leading_digits() {
        assert_eq!(format_progress("125.7").as_deref(), Some("00:02:05"));
        assert_eq!(format_progress(" 90s").as_deref(), Some("00:01:30"));
    }

    #[test]
    fn test_progress_without_digits() {
        assert_eq!(format_progress(""), None);
        assert_eq!(format_progress("-5"), None);
        assert_eq!(format_progress("n/a"), None);
    }
}
