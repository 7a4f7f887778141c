//! Local-date report ranges
//!
//! Reports select records by `registered_at`. The user picks calendar dates
//! in the office's local time; the range runs from local midnight of the
//! first day to the last instant of the last day, both inclusive.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::{RegistryError, RegistryResult};

/// An inclusive range of local calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    offset: FixedOffset,
}

impl DateRange {
    /// # Errors
    ///
    /// Returns a validation error if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate, offset: FixedOffset) -> RegistryResult<Self> {
        if start > end {
            return Err(RegistryError::Validation(format!(
                "Report start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end, offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    fn local_midnight(&self, date: NaiveDate) -> RegistryResult<DateTime<Utc>> {
        self.offset
            .from_local_datetime(&date.and_time(NaiveTime::MIN))
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| RegistryError::Validation(format!("Date out of range: {}", date)))
    }

    /// First instant of the range, in UTC
    pub fn start_utc(&self) -> RegistryResult<DateTime<Utc>> {
        self.local_midnight(self.start)
    }

    /// Last instant of the range (23:59:59.999999999 local), in UTC
    pub fn end_utc(&self) -> RegistryResult<DateTime<Utc>> {
        let next_day = self
            .end
            .succ_opt()
            .ok_or_else(|| RegistryError::Validation(format!("Date out of range: {}", self.end)))?;
        Ok(self.local_midnight(next_day)? - Duration::nanoseconds(1))
    }

    /// A UTC timestamp shown in the range's local time
    pub fn to_local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }
}
