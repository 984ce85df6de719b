//! Permissive date-time parsing and ICS timestamp formatting.
//!
//! Input records carry start/end values in whatever format the upstream API
//! uses. This module normalizes them to the `YYYYMMDDTHHmmss` form the ICS
//! renderer emits. Values are treated as naive wall-clock times: an RFC3339
//! offset is dropped, not converted, since the rendered document is
//! UTC-naive by contract.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// A date-time value that could not be parsed by any accepted format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse date, received: {value}")]
pub struct DateFormatError {
    /// The offending input value, verbatim.
    pub value: String,
}

/// Date-time formats tried in order, most specific first.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d/%m/%Y %H:%M",
    "%Y%m%dT%H%M%S",
];

/// Date-only formats, parsed as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%Y%m%d"];

/// Parses a date-time string permissively.
///
/// Tries RFC3339 first (keeping the local clock time and discarding the
/// offset), then the fixed format list, then date-only forms at midnight.
///
/// # Errors
///
/// Returns [`DateFormatError`] when no accepted format matches.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, DateFormatError> {
    let s = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    // Compact UTC form (20230307T100000Z)
    if let Some(stripped) = s.strip_suffix('Z')
        && let Ok(dt) = NaiveDateTime::parse_from_str(stripped, "%Y%m%dT%H%M%S")
    {
        return Ok(dt);
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date.and_hms_opt(0, 0, 0).expect("midnight is valid"));
        }
    }

    Err(DateFormatError {
        value: value.to_string(),
    })
}

/// Formats a parsed date-time as an ICS timestamp (`YYYYMMDDTHHmmss`).
pub fn ics_timestamp(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

/// Parses and reformats a date-time value in one step.
///
/// # Errors
///
/// Returns [`DateFormatError`] when the value cannot be parsed.
pub fn normalize_datetime(value: &str) -> Result<String, DateFormatError> {
    parse_datetime(value).map(ics_timestamp)
}
