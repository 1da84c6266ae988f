//! Attendance window model.
//!
//! A window is the half-open interval `[start, end)` over which hours are
//! aggregated, plus the UTC offset that decides which local calendar day an
//! instant belongs to.

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc, Weekday,
};

use crate::error::{EngineError, EngineResult};

/// A half-open time interval used for aggregation, usually one calendar week.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendanceWindow;
/// use chrono::{FixedOffset, NaiveDate, TimeZone, Utc, Weekday};
///
/// // Wednesday 2026-01-14, weeks starting on Sunday
/// let window = AttendanceWindow::week_containing_date(
///     NaiveDate::from_ymd_opt(2026, 1, 14).unwrap(),
///     Weekday::Sun,
///     FixedOffset::east_opt(0).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 1, 11, 0, 0, 0).unwrap());
/// assert_eq!(window.end, Utc.with_ymd_and_hms(2026, 1, 18, 0, 0, 0).unwrap());
/// assert!(!window.contains(window.end));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceWindow {
    /// Inclusive lower bound.
    pub start: DateTime<Utc>,
    /// Exclusive upper bound.
    pub end: DateTime<Utc>,
    /// Offset used to assign instants to local calendar days.
    pub offset: FixedOffset,
}

impl AttendanceWindow {
    /// Creates a window with an explicit offset for day bucketing.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self { start, end, offset }
    }

    /// Creates a window whose days are UTC calendar days.
    pub fn utc(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(start, end, utc_offset())
    }

    /// Returns the week-long window containing `instant`.
    ///
    /// The week begins at local midnight on the most recent `week_start` day
    /// on or before the instant's local date.
    pub fn week_containing(
        instant: DateTime<Utc>,
        week_start: Weekday,
        offset: FixedOffset,
    ) -> EngineResult<Self> {
        let local_date = instant.with_timezone(&offset).date_naive();
        Self::week_containing_date(local_date, week_start, offset)
    }

    /// Returns the week-long window containing the local calendar `date`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWindow` if the week does not fit in the representable
    /// range of instants.
    pub fn week_containing_date(
        date: NaiveDate,
        week_start: Weekday,
        offset: FixedOffset,
    ) -> EngineResult<Self> {
        let days_back = (date.weekday().num_days_from_monday() + 7
            - week_start.num_days_from_monday())
            % 7;
        let start = date
            .checked_sub_signed(Duration::days(i64::from(days_back)))
            .and_then(|first_day| local_midnight(first_day, offset))
            .ok_or_else(|| week_out_of_range(date))?;
        let end = start
            .checked_add_signed(Duration::days(7))
            .ok_or_else(|| week_out_of_range(date))?;

        Ok(Self { start, end, offset })
    }

    /// Returns the window of the same length immediately after this one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidWindow` if the next window ends past the latest
    /// representable instant.
    pub fn following(&self) -> EngineResult<Self> {
        let length = self.end - self.start;
        let end = self
            .end
            .checked_add_signed(length)
            .ok_or_else(|| EngineError::InvalidWindow {
                message: format!("window after {} is out of range", self.end.to_rfc3339()),
            })?;

        Ok(Self {
            start: self.end,
            end,
            offset: self.offset,
        })
    }

    /// Returns true if `instant` lies within `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Returns true if the window is empty or inverted.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The window start expressed in the window's offset.
    pub fn local_start(&self) -> DateTime<FixedOffset> {
        self.start.with_timezone(&self.offset)
    }

    /// The window end expressed in the window's offset.
    pub fn local_end(&self) -> DateTime<FixedOffset> {
        self.end.with_timezone(&self.offset)
    }

    /// The first and last local calendar dates touched by the window.
    ///
    /// An empty window touches no dates.
    pub fn local_date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        if self.is_empty() {
            return None;
        }

        let first = self.local_start().date_naive();
        let last = (self.end - Duration::milliseconds(1))
            .with_timezone(&self.offset)
            .date_naive();
        Some((first, last))
    }

    /// The local calendar dates touched by the window, in order.
    pub fn local_dates(&self) -> Vec<NaiveDate> {
        match self.local_date_range() {
            Some((first, last)) => first.iter_days().take_while(|date| *date <= last).collect(),
            None => Vec::new(),
        }
    }

    /// Returns true if the local calendar `date` is touched by the window.
    pub fn contains_local_date(&self, date: NaiveDate) -> bool {
        self.local_date_range()
            .is_some_and(|(first, last)| date >= first && date <= last)
    }
}

/// The UTC instant of local midnight on `date` in `offset`.
///
/// Returns `None` when that instant is outside the representable range.
pub fn local_midnight(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<Utc>> {
    date.and_time(NaiveTime::MIN)
        .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
        .map(|utc| utc.and_utc())
}

fn week_out_of_range(date: NaiveDate) -> EngineError {
    EngineError::InvalidWindow {
        message: format!("week containing {date} is out of range"),
    }
}

/// The zero offset.
pub fn utc_offset() -> FixedOffset {
    Utc.fix()
}
