use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

use crate::error::YtreportyError;

/// Parse a CLI timestamp argument.
///
/// An explicit UTC offset is honored and converted to UTC; a naive timestamp
/// is treated as already being UTC; a bare date means midnight UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, YtreportyError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)));
    }
    Err(YtreportyError::Protocol(format!(
        "Cannot parse timestamp '{input}': expected an ISO 8601 date or datetime"
    )))
}

/// Zulu-format serialization used for API filter parameters: RFC 3339 with a
/// `Z` suffix instead of a `+00:00` offset.
pub fn zulu(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_timestamp_is_utc() {
        let ts = parse_timestamp("2023-01-15T10:00:00").unwrap();
        assert_eq!(zulu(&ts), "2023-01-15T10:00:00Z");
    }

    #[test]
    fn aware_timestamp_converted_to_utc() {
        let ts = parse_timestamp("2023-01-15T10:00:00+02:00").unwrap();
        assert_eq!(zulu(&ts), "2023-01-15T08:00:00Z");
    }

    #[test]
    fn bare_date_is_midnight_utc() {
        let ts = parse_timestamp("2023-01-15").unwrap();
        assert_eq!(zulu(&ts), "2023-01-15T00:00:00Z");
    }

    #[test]
    fn fractional_seconds_kept() {
        let ts = parse_timestamp("2023-01-15T10:00:00.500").unwrap();
        assert_eq!(zulu(&ts), "2023-01-15T10:00:00.500Z");
    }

    #[test]
    fn garbage_rejected() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("").is_err());
    }
}
