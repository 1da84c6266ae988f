//! Team weekly summary.
//!
//! Aggregates punches and work updates for every user active in a window
//! into one row per user, ordered by hours worked.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::models::{AttendanceWindow, PunchEvent, TeamMemberSummary, WorkUpdate};

use super::rounding::round_hours;
use super::weekly_hours::compute_weekly_hours;

/// Default length of a work day used to estimate days worked.
pub const DEFAULT_STANDARD_WORKDAY_HOURS: u32 = 8;

/// Builds the team summary for a window.
///
/// Users appear if they have at least one punch or work update in the window.
/// Hours come from the same adjacency scan as [`compute_weekly_hours`]. Days
/// worked are estimated as `max(1, ceil(hours / standard_workday_hours))` and
/// the daily average is the unrounded hours divided by that estimate.
///
/// Rows are sorted by `total_hours_week` descending, then by user id.
///
/// # Arguments
///
/// * `punches` - Punches of any number of users
/// * `updates` - Work updates of any number of users
/// * `names` - Display names by user id; missing users fall back to their id
/// * `window` - The week to summarise
/// * `standard_workday_hours` - Hours in a standard work day (must be positive)
pub fn build_team_summary(
    punches: &[PunchEvent],
    updates: &[WorkUpdate],
    names: &HashMap<String, String>,
    window: &AttendanceWindow,
    standard_workday_hours: Decimal,
) -> Vec<TeamMemberSummary> {
    let mut punches_by_user: BTreeMap<&str, Vec<PunchEvent>> = BTreeMap::new();
    for punch in punches.iter().filter(|p| window.contains(p.timestamp)) {
        punches_by_user
            .entry(punch.user_id.as_str())
            .or_default()
            .push(punch.clone());
    }

    let mut updates_by_user: BTreeMap<&str, usize> = BTreeMap::new();
    for update in updates
        .iter()
        .filter(|u| window.contains_local_date(u.update_date))
    {
        *updates_by_user.entry(update.user_id.as_str()).or_insert(0) += 1;
    }

    let mut user_ids: Vec<&str> = punches_by_user
        .keys()
        .chain(updates_by_user.keys())
        .copied()
        .collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let mut rows: Vec<TeamMemberSummary> = user_ids
        .into_iter()
        .map(|user_id| {
            let user_punches = punches_by_user
                .get(user_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let raw_hours = compute_weekly_hours(user_punches, window).raw_hours;

            TeamMemberSummary {
                user_id: user_id.to_string(),
                name: names
                    .get(user_id)
                    .cloned()
                    .unwrap_or_else(|| user_id.to_string()),
                total_hours_week: round_hours(raw_hours),
                updates_week: updates_by_user.get(user_id).copied().unwrap_or(0),
                avg_daily_hours: average_daily_hours(raw_hours, standard_workday_hours),
            }
        })
        .collect();

    // Stable sort keeps the user id order for equal hours
    rows.sort_by(|a, b| b.total_hours_week.cmp(&a.total_hours_week));
    rows
}

/// Average hours per estimated work day, rounded to one decimal place.
fn average_daily_hours(raw_hours: Decimal, standard_workday_hours: Decimal) -> Decimal {
    if standard_workday_hours <= Decimal::ZERO {
        return round_hours(raw_hours);
    }
    let work_days = (raw_hours / standard_workday_hours).ceil().max(Decimal::ONE);
    round_hours(raw_hours / work_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PunchDirection;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, hour, minute, 0).unwrap()
    }

    fn punch(user: &str, direction: PunchDirection, ts: DateTime<Utc>) -> PunchEvent {
        PunchEvent::new(user, direction, ts)
    }

    fn update(user: &str, date: &str) -> WorkUpdate {
        WorkUpdate {
            user_id: user.to_string(),
            update_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            content: None,
        }
    }

    fn test_week() -> AttendanceWindow {
        AttendanceWindow::utc(at(11, 0, 0), at(18, 0, 0))
    }

    fn workday(user: &str, day: u32, start: u32, end: u32) -> Vec<PunchEvent> {
        vec![
            punch(user, PunchDirection::In, at(day, start, 0)),
            punch(user, PunchDirection::Out, at(day, end, 0)),
        ]
    }

    #[test]
    fn test_sorted_by_hours_descending() {
        let mut punches = workday("alice", 12, 9, 13);
        punches.extend(workday("bob", 12, 9, 17));
        punches.extend(workday("bob", 13, 9, 17));

        let rows = build_team_summary(&punches, &[], &HashMap::new(), &test_week(), dec("8"));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].user_id, "bob");
        assert_eq!(rows[0].total_hours_week, dec("16"));
        assert_eq!(rows[1].user_id, "alice");
        assert_eq!(rows[1].total_hours_week, dec("4"));
    }

    #[test]
    fn test_average_uses_estimated_work_days() {
        // 17 hours -> ceil(17 / 8) = 3 days -> 5.666... -> 5.7
        let mut punches = workday("alice", 12, 8, 17);
        punches.extend(workday("alice", 13, 9, 17));

        let rows = build_team_summary(&punches, &[], &HashMap::new(), &test_week(), dec("8"));

        assert_eq!(rows[0].total_hours_week, dec("17"));
        assert_eq!(rows[0].avg_daily_hours, dec("5.7"));
    }

    #[test]
    fn test_user_with_only_updates_is_listed_with_zero_hours() {
        let updates = vec![update("carol", "2026-01-12"), update("carol", "2026-01-13")];

        let rows = build_team_summary(&[], &updates, &HashMap::new(), &test_week(), dec("8"));

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, "carol");
        assert_eq!(rows[0].updates_week, 2);
        assert_eq!(rows[0].total_hours_week, Decimal::ZERO);
        assert_eq!(rows[0].avg_daily_hours, Decimal::ZERO);
    }

    #[test]
    fn test_updates_outside_week_are_ignored() {
        let updates = vec![update("carol", "2026-01-10"), update("carol", "2026-01-18")];

        let rows = build_team_summary(&[], &updates, &HashMap::new(), &test_week(), dec("8"));

        assert!(rows.is_empty());
    }

    #[test]
    fn test_names_fall_back_to_user_id() {
        let mut punches = workday("alice", 12, 9, 17);
        punches.extend(workday("bob", 12, 9, 17));
        let mut names = HashMap::new();
        names.insert("alice".to_string(), "Alice Smith".to_string());

        let rows = build_team_summary(&punches, &[], &names, &test_week(), dec("8"));

        assert_eq!(rows[0].name, "Alice Smith");
        assert_eq!(rows[1].name, "bob");
    }

    #[test]
    fn test_ties_ordered_by_user_id() {
        let mut punches = workday("zed", 12, 9, 17);
        punches.extend(workday("amy", 12, 9, 17));

        let rows = build_team_summary(&punches, &[], &HashMap::new(), &test_week(), dec("8"));

        assert_eq!(rows[0].user_id, "amy");
        assert_eq!(rows[1].user_id, "zed");
    }

    #[test]
    fn test_punches_are_paired_per_user() {
        // Interleaved punches from two users must not pair across users
        let punches = vec![
            punch("alice", PunchDirection::In, at(12, 9, 0)),
            punch("bob", PunchDirection::In, at(12, 9, 30)),
            punch("alice", PunchDirection::Out, at(12, 12, 0)),
            punch("bob", PunchDirection::Out, at(12, 10, 30)),
        ];

        let rows = build_team_summary(&punches, &[], &HashMap::new(), &test_week(), dec("8"));

        assert_eq!(rows[0].user_id, "alice");
        assert_eq!(rows[0].total_hours_week, dec("3"));
        assert_eq!(rows[1].total_hours_week, dec("1"));
    }

    #[test]
    fn test_non_positive_workday_falls_back_to_total() {
        assert_eq!(average_daily_hours(dec("12"), Decimal::ZERO), dec("12"));
    }
}
