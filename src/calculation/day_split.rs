//! Splitting sessions at local midnight.
//!
//! A session that crosses midnight in the window's offset is credited to each
//! local calendar day it touches, in proportion to the time spent on that day.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::models::local_midnight;

/// The portion of a session that falls on one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPortion {
    /// The local calendar day.
    pub date: NaiveDate,
    /// Milliseconds of the session that fall on `date`.
    pub millis: i64,
}

/// Splits `[start, end)` at every local midnight of `offset`.
///
/// Portions are returned in chronological order and their milliseconds sum to
/// exactly `end - start`. An empty or inverted interval yields no portions.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::split_by_local_day;
/// use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 17, 22, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2026, 1, 18, 6, 0, 0).unwrap();
///
/// let portions = split_by_local_day(start, end, FixedOffset::east_opt(0).unwrap());
/// assert_eq!(portions.len(), 2);
/// assert_eq!(portions[0].date, NaiveDate::from_ymd_opt(2026, 1, 17).unwrap());
/// assert_eq!(portions[0].millis, 2 * 3_600_000);
/// assert_eq!(portions[1].millis, 6 * 3_600_000);
/// ```
pub fn split_by_local_day(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    offset: FixedOffset,
) -> Vec<DayPortion> {
    let mut portions = Vec::new();
    let mut cursor = start;

    while cursor < end {
        let date = cursor.with_timezone(&offset).date_naive();

        // Portion ends at the next local midnight or the session end, whichever is first
        let portion_end = date
            .succ_opt()
            .and_then(|next_day| local_midnight(next_day, offset))
            .map_or(end, |midnight| midnight.min(end));

        portions.push(DayPortion {
            date,
            millis: (portion_end - cursor).num_milliseconds(),
        });

        cursor = portion_end;
    }

    portions
}
