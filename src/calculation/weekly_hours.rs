//! Weekly hours aggregation.
//!
//! This module pairs IN/OUT punches into work sessions and totals the worked
//! hours inside an attendance window.
//!
//! Pairing is an adjacency scan, not a stack matcher: after sorting, every
//! adjacent pair of punches is inspected and only a strict IN followed by OUT
//! counts. `IN, IN, OUT` therefore credits only the second IN. Every skipped
//! punch is reported as a [`PunchAnomaly`] so the effect of this policy stays
//! visible to reviewers.

use std::collections::BTreeMap;

use crate::error::EngineResult;
use crate::models::{
    AnomalyKind, AttendanceWindow, HoursSummary, PunchAnomaly, PunchDirection, PunchEvent,
    WorkSession,
};

use super::day_split::split_by_local_day;
use super::rounding::millis_to_hours;

/// Computes worked hours for one user's punches within a window.
///
/// The caller is responsible for passing punches of a single user. Events
/// outside `[window.start, window.end)` are discarded; the rest are sorted by
/// timestamp (stable, so simultaneous punches keep their input order) and
/// every adjacent IN→OUT pair contributes its duration. Any other adjacency,
/// including a trailing IN, contributes nothing and is not an error.
///
/// The function is total and pure: empty, unsorted or malformed input simply
/// yields fewer (or zero) hours.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::compute_weekly_hours;
/// use attendance_engine::models::{AttendanceWindow, PunchDirection, PunchEvent};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let at = |h: u32, m: u32| Utc.with_ymd_and_hms(2026, 1, 13, h, m, 0).unwrap();
/// let events = vec![
///     PunchEvent::new("user_1", PunchDirection::In, at(9, 0)),
///     PunchEvent::new("user_1", PunchDirection::Out, at(12, 0)),
///     PunchEvent::new("user_1", PunchDirection::In, at(13, 0)),
///     PunchEvent::new("user_1", PunchDirection::Out, at(17, 30)),
/// ];
/// let window = AttendanceWindow::utc(at(0, 0), at(23, 59));
///
/// let summary = compute_weekly_hours(&events, &window);
/// assert_eq!(summary.total_hours, Decimal::new(75, 1)); // 7.5 hours
/// ```
pub fn compute_weekly_hours(events: &[PunchEvent], window: &AttendanceWindow) -> HoursSummary {
    let mut punches: Vec<&PunchEvent> = events
        .iter()
        .filter(|event| window.contains(event.timestamp))
        .collect();
    let excluded_events = events.len() - punches.len();

    punches.sort_by_key(|event| event.timestamp);

    let mut daily_millis: BTreeMap<_, i64> = BTreeMap::new();
    let mut sessions = Vec::new();
    let mut anomalies = Vec::new();

    for (index, current) in punches.iter().enumerate() {
        let previous = index.checked_sub(1).map(|i| punches[i]);
        let next = punches.get(index + 1);

        match current.direction {
            PunchDirection::In => match next.map(|event| (event.direction, event.timestamp)) {
                Some((PunchDirection::Out, clock_out)) => {
                    // Sorted input guarantees clock_out >= clock_in; the split clamps anyway
                    let portions = split_by_local_day(current.timestamp, clock_out, window.offset);
                    let session_millis: i64 = portions.iter().map(|p| p.millis).sum();
                    for portion in portions {
                        *daily_millis.entry(portion.date).or_insert(0) += portion.millis;
                    }
                    sessions.push(WorkSession {
                        clock_in: current.timestamp,
                        clock_out,
                        hours: millis_to_hours(session_millis),
                    });
                }
                Some((PunchDirection::In, _)) => anomalies.push(PunchAnomaly {
                    kind: AnomalyKind::OrphanedIn,
                    timestamp: current.timestamp,
                }),
                None => anomalies.push(PunchAnomaly {
                    kind: AnomalyKind::OpenSession,
                    timestamp: current.timestamp,
                }),
            },
            PunchDirection::Out => {
                let closes_session =
                    previous.is_some_and(|event| event.direction == PunchDirection::In);
                if !closes_session {
                    anomalies.push(PunchAnomaly {
                        kind: AnomalyKind::UnmatchedOut,
                        timestamp: current.timestamp,
                    });
                }
            }
        }
    }

    if !anomalies.is_empty() {
        tracing::debug!(
            anomalies = anomalies.len(),
            sessions = sessions.len(),
            "Skipped unpaired punches"
        );
    }

    HoursSummary::from_daily_millis(daily_millis, sessions, anomalies, excluded_events)
}

/// Computes hours for `weeks` consecutive windows starting at `first_window`.
///
/// Each window is aggregated independently, so a session whose IN and OUT
/// fall in different windows is not counted in either. Combine the results
/// with [`HoursSummary::merge`] for a multi-week total.
///
/// # Errors
///
/// Returns `InvalidWindow` if a later window would end past the latest
/// representable instant.
pub fn compute_hours_by_week(
    events: &[PunchEvent],
    first_window: &AttendanceWindow,
    weeks: u32,
) -> EngineResult<Vec<(AttendanceWindow, HoursSummary)>> {
    let mut results = Vec::with_capacity(weeks as usize);
    let mut window = *first_window;

    for week in 0..weeks {
        if week > 0 {
            window = window.following()?;
        }
        results.push((window, compute_weekly_hours(events, &window)));
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, hour, minute, 0).unwrap()
    }

    fn punch_in(ts: DateTime<Utc>) -> PunchEvent {
        PunchEvent::new("user_1", PunchDirection::In, ts)
    }

    fn punch_out(ts: DateTime<Utc>) -> PunchEvent {
        PunchEvent::new("user_1", PunchDirection::Out, ts)
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    /// Sunday 2026-01-11 through Saturday 2026-01-17, UTC days.
    fn test_week() -> AttendanceWindow {
        AttendanceWindow::utc(at(11, 0, 0), at(18, 0, 0))
    }

    // ==========================================================================
    // WH-001: Empty input yields zero
    // ==========================================================================
    #[test]
    fn test_wh_001_empty_input_is_zero() {
        let summary = compute_weekly_hours(&[], &test_week());

        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert!(summary.by_day.is_empty());
        assert!(summary.sessions.is_empty());
        assert!(summary.anomalies.is_empty());
    }

    // ==========================================================================
    // WH-002: Split day with lunch break
    // ==========================================================================
    #[test]
    fn test_wh_002_split_day_totals_7_5() {
        let events = vec![
            punch_in(at(13, 9, 0)),
            punch_out(at(13, 12, 0)),
            punch_in(at(13, 13, 0)),
            punch_out(at(13, 17, 30)),
        ];

        let summary = compute_weekly_hours(&events, &test_week());

        assert_eq!(summary.total_hours, dec("7.5"));
        assert_eq!(summary.sessions.len(), 2);
        assert_eq!(summary.by_day[&make_date("2026-01-13")], dec("7.5"));
        assert!(summary.anomalies.is_empty());
    }

    // ==========================================================================
    // WH-003: Duplicate IN only credits the adjacent pair
    // ==========================================================================
    #[test]
    fn test_wh_003_duplicate_in_counts_only_second_in() {
        let events = vec![
            punch_in(at(13, 9, 0)),
            punch_in(at(13, 9, 5)),
            punch_out(at(13, 17, 0)),
        ];

        let summary = compute_weekly_hours(&events, &test_week());

        // 09:05 -> 17:00 = 7.9166... hours
        assert_eq!(summary.total_hours, dec("7.9"));
        assert!(summary.raw_hours > dec("7.91") && summary.raw_hours < dec("7.92"));
        assert_eq!(summary.sessions.len(), 1);
        assert_eq!(summary.sessions[0].clock_in, at(13, 9, 5));
        assert_eq!(
            summary.anomalies,
            vec![PunchAnomaly {
                kind: AnomalyKind::OrphanedIn,
                timestamp: at(13, 9, 0),
            }]
        );
    }

    // ==========================================================================
    // WH-004: Lone IN contributes nothing
    // ==========================================================================
    #[test]
    fn test_wh_004_lone_in_is_zero() {
        let summary = compute_weekly_hours(&[punch_in(at(13, 9, 0))], &test_week());

        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert_eq!(summary.anomalies[0].kind, AnomalyKind::OpenSession);
    }

    // ==========================================================================
    // WH-005: Unsorted input is sorted before pairing
    // ==========================================================================
    #[test]
    fn test_wh_005_unsorted_input() {
        let events = vec![
            punch_out(at(13, 17, 0)),
            punch_in(at(13, 9, 0)),
        ];

        let summary = compute_weekly_hours(&events, &test_week());
        assert_eq!(summary.total_hours, dec("8"));
    }

    // ==========================================================================
    // WH-006: Events outside the window are excluded
    // ==========================================================================
    #[test]
    fn test_wh_006_events_outside_window_excluded() {
        let events = vec![
            // Previous week
            punch_in(at(9, 9, 0)),
            punch_out(at(9, 17, 0)),
            // This week
            punch_in(at(12, 9, 0)),
            punch_out(at(12, 13, 0)),
            // Exactly at the exclusive end
            punch_in(at(18, 0, 0)),
        ];

        let summary = compute_weekly_hours(&events, &test_week());

        assert_eq!(summary.total_hours, dec("4"));
        assert_eq!(summary.excluded_events, 3);
        assert!(summary.anomalies.is_empty());
    }

    // ==========================================================================
    // WH-007: Session straddling the window start loses its IN
    // ==========================================================================
    #[test]
    fn test_wh_007_session_across_window_start_not_counted() {
        let events = vec![punch_in(at(10, 22, 0)), punch_out(at(11, 2, 0))];

        let summary = compute_weekly_hours(&events, &test_week());

        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert_eq!(summary.anomalies[0].kind, AnomalyKind::UnmatchedOut);
    }

    // ==========================================================================
    // WH-008: Duplicate OUT and leading OUT are skipped
    // ==========================================================================
    #[test]
    fn test_wh_008_unmatched_outs() {
        let events = vec![
            punch_out(at(12, 8, 0)),
            punch_in(at(12, 9, 0)),
            punch_out(at(12, 12, 0)),
            punch_out(at(12, 12, 30)),
        ];

        let summary = compute_weekly_hours(&events, &test_week());

        assert_eq!(summary.total_hours, dec("3"));
        let kinds: Vec<_> = summary.anomalies.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AnomalyKind::UnmatchedOut, AnomalyKind::UnmatchedOut]);
    }

    // ==========================================================================
    // WH-009: OUT followed by IN resumes pairing
    // ==========================================================================
    #[test]
    fn test_wh_009_pairing_resumes_after_out_in() {
        let events = vec![
            punch_in(at(12, 9, 0)),
            punch_out(at(12, 10, 0)),
            punch_in(at(12, 11, 0)),
            punch_out(at(12, 12, 0)),
            punch_in(at(14, 9, 0)),
            punch_out(at(14, 10, 30)),
        ];

        let summary = compute_weekly_hours(&events, &test_week());

        assert_eq!(summary.total_hours, dec("3.5"));
        assert_eq!(summary.by_day[&make_date("2026-01-12")], dec("2"));
        assert_eq!(summary.by_day[&make_date("2026-01-14")], dec("1.5"));
    }

    // ==========================================================================
    // WH-010: Overnight session is split by local day
    // ==========================================================================
    #[test]
    fn test_wh_010_overnight_session_split_by_day() {
        let events = vec![punch_in(at(16, 22, 0)), punch_out(at(17, 6, 0))];

        let summary = compute_weekly_hours(&events, &test_week());

        assert_eq!(summary.total_hours, dec("8"));
        assert_eq!(summary.by_day[&make_date("2026-01-16")], dec("2"));
        assert_eq!(summary.by_day[&make_date("2026-01-17")], dec("6"));
    }

    // ==========================================================================
    // WH-011: Day bucketing follows the window offset
    // ==========================================================================
    #[test]
    fn test_wh_011_bucketing_uses_window_offset() {
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let window = AttendanceWindow::new(at(11, 5, 0), at(18, 5, 0), offset);
        // 02:00-04:00 UTC on the 13th is 21:00-23:00 on the 12th at -05:00
        let events = vec![punch_in(at(13, 2, 0)), punch_out(at(13, 4, 0))];

        let summary = compute_weekly_hours(&events, &window);

        assert_eq!(summary.by_day.len(), 1);
        assert_eq!(summary.by_day[&make_date("2026-01-12")], dec("2"));
    }

    // ==========================================================================
    // WH-012: Simultaneous punches keep input order
    // ==========================================================================
    #[test]
    fn test_wh_012_simultaneous_punches_are_stable() {
        let instant = at(12, 9, 0);
        let in_first = vec![punch_in(instant), punch_out(instant)];
        let out_first = vec![punch_out(instant), punch_in(instant)];

        let first = compute_weekly_hours(&in_first, &test_week());
        let second = compute_weekly_hours(&out_first, &test_week());

        // A zero-length session is still a session
        assert_eq!(first.sessions.len(), 1);
        assert_eq!(first.total_hours, Decimal::ZERO);
        assert!(second.sessions.is_empty());
        assert_eq!(second.anomalies.len(), 2);
    }

    // ==========================================================================
    // WH-013: Sub-second precision is kept
    // ==========================================================================
    #[test]
    fn test_wh_013_millisecond_precision() {
        let start = at(12, 9, 0);
        let events = vec![punch_in(start), punch_out(start + Duration::milliseconds(1_800_500))];

        let summary = compute_weekly_hours(&events, &test_week());

        assert_eq!(summary.worked_millis(), 1_800_500);
        assert_eq!(summary.total_hours, dec("0.5"));
    }

    #[test]
    fn test_idempotent() {
        let events = vec![
            punch_in(at(13, 9, 0)),
            punch_in(at(13, 9, 5)),
            punch_out(at(13, 17, 0)),
        ];
        let window = test_week();

        assert_eq!(
            compute_weekly_hours(&events, &window),
            compute_weekly_hours(&events, &window)
        );
    }

    #[test]
    fn test_hours_by_week_keeps_weeks_separate() {
        let events = vec![
            punch_in(at(13, 9, 0)),
            punch_out(at(13, 17, 0)),
            punch_in(at(20, 9, 0)),
            punch_out(at(20, 13, 0)),
        ];

        let weeks = compute_hours_by_week(&events, &test_week(), 2).unwrap();

        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].1.total_hours, dec("8"));
        assert_eq!(weeks[1].0.start, at(18, 0, 0));
        assert_eq!(weeks[1].1.total_hours, dec("4"));

        let combined = weeks[0].1.merge(&weeks[1].1);
        assert_eq!(combined.total_hours, dec("12"));
        assert_eq!(combined.sessions.len(), 2);
    }

    #[test]
    fn test_hours_by_week_zero_weeks() {
        assert!(compute_hours_by_week(&[], &test_week(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_hours_by_week_past_latest_instant_is_invalid() {
        let start = DateTime::<Utc>::MAX_UTC - Duration::days(10);
        let first = AttendanceWindow::utc(start, start + Duration::days(7));

        assert_eq!(compute_hours_by_week(&[], &first, 1).unwrap().len(), 1);
        assert!(matches!(
            compute_hours_by_week(&[], &first, 2),
            Err(crate::error::EngineError::InvalidWindow { .. })
        ));
    }
}
