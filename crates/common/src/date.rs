//! Text codec for document dates.
//!
//! Dates are stored as fixed-width local time without an offset, e.g.
//! `2024-05-17 10:30:00`, and always interpreted in the process timezone.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use crate::error::DecodeError;

/// `strftime` pattern of the stored date text.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DATE_WIDTH: usize = "YYYY-MM-DD HH:MM:SS".len();

/// Formats a date in the stored text representation.
pub fn format_date(date: &DateTime<Local>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses stored date text as local time.
///
/// Fails with [`DecodeError::Date`] carrying the raw value for anything that is
/// not exactly `YYYY-MM-DD HH:MM:SS`. On an ambiguous local time (DST fold) the
/// earlier instant wins.
pub fn parse_date(value: &str) -> Result<DateTime<Local>, DecodeError> {
    let bad_date = || DecodeError::Date(value.to_string());

    if value.len() != DATE_WIDTH {
        return Err(bad_date());
    }

    let naive = NaiveDateTime::parse_from_str(value, DATE_FORMAT).map_err(|_| bad_date())?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(bad_date)
}
