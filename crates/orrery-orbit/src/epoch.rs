//! Reference instant from which orbital phase is measured.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::OrbitError;

/// Seconds in one mean solar day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// A fixed reference instant. Elapsed time for orbital phase is measured from here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Epoch(DateTime<Utc>);

impl Epoch {
    /// Wrap an arbitrary UTC instant.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// Midnight UTC on 2000-01-01.
    ///
    /// This is the calendar date, not the astronomical J2000.0 instant (which is
    /// at noon TT). Body phase angles are authored against midnight.
    pub fn calendar_2000() -> Self {
        Self(Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).single().unwrap_or_default())
    }

    /// Parse an epoch from a date string (see [`parse_date`]).
    pub fn parse(input: &str) -> Result<Self, OrbitError> {
        parse_date(input).map(Self)
    }

    /// The wrapped instant.
    pub fn instant(&self) -> DateTime<Utc> {
        self.0
    }

    /// Fractional days from the epoch to `at`. Negative before the epoch.
    pub fn elapsed_days(&self, at: DateTime<Utc>) -> f64 {
        let delta = at.signed_duration_since(self.0);
        // Millisecond resolution, matching how calendar dates are compared.
        delta.num_milliseconds() as f64 / (SECONDS_PER_DAY * 1000.0)
    }
}

impl Default for Epoch {
    fn default() -> Self {
        Self::calendar_2000()
    }
}

/// Parse a calendar date (`YYYY-MM-DD`, midnight UTC) or an RFC 3339 date-time.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, OrbitError> {
    let trimmed = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| OrbitError::InvalidDate {
            input: input.to_string(),
        })
}
