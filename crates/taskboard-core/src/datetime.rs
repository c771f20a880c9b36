use chrono::{DateTime, NaiveDateTime};

/// Parses a backend timestamp: RFC 3339, or the naive ISO form the
/// backend emits (`2024-03-01T09:30:00.123456`).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

pub fn display_date(raw: Option<&str>) -> String {
    format_with(raw, "%Y-%m-%d")
}

pub fn display_datetime(raw: Option<&str>) -> String {
    format_with(raw, "%Y-%m-%d %H:%M")
}

fn format_with(raw: Option<&str>, fmt: &str) -> String {
    match raw {
        None => "—".to_string(),
        Some(value) => parse_timestamp(value)
            .map(|ts| ts.format(fmt).to_string())
            .unwrap_or_else(|| value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_naive_and_rfc3339_forms() {
        let naive = parse_timestamp("2024-03-01T09:30:00.123456").unwrap();
        assert_eq!(
            naive.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2024-03-01 09:30:00"
        );

        let zoned = parse_timestamp("2024-03-01T09:30:00+02:00").unwrap();
        assert_eq!(zoned.format("%H:%M").to_string(), "07:30");

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn display_falls_back_to_raw_or_dash() {
        assert_eq!(display_date(Some("2024-03-01T09:30:00")), "2024-03-01");
        assert_eq!(
            display_datetime(Some("2024-03-01T09:30:00Z")),
            "2024-03-01 09:30"
        );
        assert_eq!(display_date(Some("soon")), "soon");
        assert_eq!(display_date(None), "—");
    }
}
