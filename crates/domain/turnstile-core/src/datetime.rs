use chrono::{DateTime, NaiveDateTime};

/// Parse an event timestamp as sent by the backend.
/// The wire format is ISO 8601 without a zone (`2025-06-14T18:00:00`),
/// but some records carry a trailing offset, so accept RFC 3339 too.
pub fn parse_event_datetime(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local())
}

/// Human form used by the screens, e.g. "14 Jun 2025, 18:00".
/// Falls back to the raw string when the timestamp does not parse.
pub fn format_event_datetime(raw: &str) -> String {
    match parse_event_datetime(raw) {
        Some(dt) => dt.format("%d %b %Y, %H:%M").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naive_wire_timestamp() {
        let dt = parse_event_datetime("2025-06-14T18:00:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2025-06-14 18:00");
    }

    #[test]
    fn parses_rfc3339_timestamp() {
        assert!(parse_event_datetime("2025-06-14T18:00:00+02:00").is_some());
    }

    #[test]
    fn formats_for_display() {
        assert_eq!(
            format_event_datetime("2025-06-14T18:00:00"),
            "14 Jun 2025, 18:00"
        );
    }

    #[test]
    fn unparseable_timestamp_passes_through() {
        assert_eq!(format_event_datetime("tba"), "tba");
    }
}
