//! Time-derived CI build index.
//!
//! The index packs the number of whole days since 2000-01-01T00:00:00Z into
//! the upper 16 bits and the number of seconds since that day's UTC midnight,
//! halved, into the lower 16 bits. Two timestamps in the same 2 second bucket
//! share an index; later buckets always produce larger indices.
//!
//! The timestamp is always an argument; nothing here reads a clock.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

use crate::error::{CSemVerError, Result};

/// `num_days_from_ce()` of 2000-01-01, the build index epoch.
const EPOCH_DAYS_FROM_CE: i64 = 730_120;

/// Numeric build index for `timestamp`, after conversion to UTC.
///
/// Timestamps before the epoch, or more than `u16::MAX` days after it, are
/// rejected as [`CSemVerError::TimestampOutOfRange`].
pub fn build_index_value<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Result<u32> {
    let utc = timestamp.with_timezone(&Utc);
    let days = i64::from(utc.num_days_from_ce()) - EPOCH_DAYS_FROM_CE;
    let days = u16::try_from(days)
        .map_err(|_| CSemVerError::TimestampOutOfRange(utc.to_rfc3339()))?;
    let half_seconds = utc.num_seconds_from_midnight() / 2;
    Ok((u32::from(days) << 16) + half_seconds)
}

/// Decimal string form of [`build_index_value`].
pub fn build_index<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Result<String> {
    Ok(build_index_value(timestamp)?.to_string())
}

/// Eight digit, zero padded, upper-case hexadecimal form of [`build_index_value`].
pub fn build_index_hex<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> Result<String> {
    Ok(format!("{:08X}", build_index_value(timestamp)?))
}
