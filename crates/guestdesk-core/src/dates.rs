use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Offset-bearing layouts beyond strict RFC 3339. `%#z` takes `Z`, `+01:00`,
/// or `+0100`.
const OFFSET_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parses the date formats the upstream is known to send. Strings without an
/// offset are read as UTC; day-only strings resolve to midnight UTC.
#[must_use]
pub fn parse_date_time(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = OFFSET_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(naive.and_utc());
    }
    NAIVE_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn rfc3339_and_rfc2822() {
        assert_eq!(
            parse_date_time("2026-02-20T15:42:10Z"),
            Some(utc(2026, 2, 20, 15, 42, 10))
        );
        assert_eq!(
            parse_date_time("Fri, 20 Feb 2026 15:42:10 +0000"),
            Some(utc(2026, 2, 20, 15, 42, 10))
        );
    }

    #[test]
    fn minute_precision_with_zulu_or_offset() {
        assert_eq!(
            parse_date_time("2026-02-20T15:42Z"),
            Some(utc(2026, 2, 20, 15, 42, 0))
        );
        assert_eq!(
            parse_date_time("2026-02-20T15:42+01:00"),
            Some(utc(2026, 2, 20, 14, 42, 0))
        );
    }

    #[test]
    fn offset_without_colon() {
        assert_eq!(
            parse_date_time("2026-02-20T15:42:10+0100"),
            Some(utc(2026, 2, 20, 14, 42, 10))
        );
    }

    #[test]
    fn offsetless_values_are_utc() {
        assert_eq!(
            parse_date_time("2026-02-20 15:42:10"),
            Some(utc(2026, 2, 20, 15, 42, 10))
        );
        assert_eq!(
            parse_date_time("2026-02-20T15:42:10"),
            Some(utc(2026, 2, 20, 15, 42, 10))
        );
        assert_eq!(parse_date_time("2026/02/20"), Some(utc(2026, 2, 20, 0, 0, 0)));
    }

    #[test]
    fn rejects_blank_and_garbage() {
        assert!(parse_date_time("  ").is_none());
        assert!(parse_date_time("yesterday").is_none());
        assert!(parse_date_time("2026-13-45").is_none());
    }
}
