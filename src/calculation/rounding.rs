//! Hour conversion and display rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places hour totals are rounded to for display.
pub const HOURS_DECIMAL_PLACES: u32 = 1;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Converts a whole number of milliseconds into hours.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::millis_to_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(millis_to_hours(27_000_000), Decimal::new(75, 1)); // 7.5 hours
/// ```
pub fn millis_to_hours(millis: i64) -> Decimal {
    Decimal::from(millis) / Decimal::from(MILLIS_PER_HOUR)
}

/// Rounds an hour value to one decimal place, half-up.
///
/// Hour values are never negative, so away-from-zero midpoint rounding is
/// the same as round-half-up here.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::round_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_hours(Decimal::from_str("7.9166").unwrap()), Decimal::new(79, 1));
/// assert_eq!(round_hours(Decimal::from_str("0.25").unwrap()), Decimal::new(3, 1));
/// ```
pub fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(HOURS_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
