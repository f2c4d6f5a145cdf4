//! Time and date conversion utilities.
//!
//! The database layer stores naive UTC timestamps through chrono while tower-sessions expresses
//! session expiry with `time::OffsetDateTime`. These helpers convert between the two.

use chrono::{DateTime, NaiveDateTime};
use time::OffsetDateTime;

use crate::server::error::Error;

/// Converts an `OffsetDateTime` into a naive UTC timestamp.
///
/// # Returns
/// - `Ok(NaiveDateTime)` - The same instant in UTC without offset information
/// - `Err(Error::ParseError)` - The instant is outside chrono's representable range
pub fn offset_to_naive_utc(datetime: OffsetDateTime) -> Result<NaiveDateTime, Error> {
    DateTime::from_timestamp(datetime.unix_timestamp(), datetime.nanosecond())
        .map(|utc| utc.naive_utc())
        .ok_or_else(|| {
            Error::ParseError(format!(
                "Timestamp {} is out of range for chrono",
                datetime
            ))
        })
}

/// Converts a naive UTC timestamp into an `OffsetDateTime` in UTC.
///
/// Sub-second precision is kept.
pub fn naive_utc_to_offset(datetime: NaiveDateTime) -> Result<OffsetDateTime, Error> {
    let nanos = datetime.and_utc().timestamp_nanos_opt().ok_or_else(|| {
        Error::ParseError(format!("Timestamp {} is out of range for time", datetime))
    })?;

    OffsetDateTime::from_unix_timestamp_nanos(i128::from(nanos)).map_err(|e| {
        Error::ParseError(format!(
            "Timestamp {} is out of range for time: {}",
            datetime, e
        ))
    })
}
