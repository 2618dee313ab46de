//! Due-routine computation
//!
//! A routine is due when the time between its last completion and the end
//! of the current week is strictly greater than its frequency. Anchoring on
//! the week boundary (not on "now") means a routine done on Monday does not
//! turn due again mid-week.
//!
//! Comparisons use wall-clock time in the reference instant's time zone: a
//! completion date counts from midnight of that day.

use super::model::{ExpectedRoutine, Record, Routine, RoutineId, RoutineTitle, Titled};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use home_common::time::end_of_week;
use std::collections::HashMap;

/// Routine with its evaluated state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineStatus {
    pub routine: Routine,
    pub last_recorded_at: Option<NaiveDate>,
    pub due: bool,
}

impl Titled for RoutineStatus {
    fn title(&self) -> &RoutineTitle {
        &self.routine.title
    }
}

/// Latest completion date among `records`
pub fn last_recorded_at(records: &[Record]) -> Option<NaiveDate> {
    records.iter().map(|record| record.recorded_at).max()
}

/// `anchor - last > frequency_weeks` (strict: exactly equal is not due)
pub fn exceeds_frequency(anchor: NaiveDateTime, last: NaiveDateTime, frequency_weeks: u32) -> bool {
    anchor - last > Duration::weeks(i64::from(frequency_weeks))
}

fn due_against(anchor: NaiveDateTime, last_recorded_at: Option<NaiveDate>, frequency_weeks: u32) -> bool {
    match last_recorded_at {
        None => true,
        Some(date) => exceeds_frequency(anchor, date.and_time(NaiveTime::MIN), frequency_weeks),
    }
}

/// Whether a routine last completed on `last_recorded_at` is due at `reference`
pub fn is_due<Tz: TimeZone>(
    last_recorded_at: Option<NaiveDate>,
    frequency_weeks: u32,
    reference: &DateTime<Tz>,
) -> bool {
    due_against(end_of_week(reference).naive_local(), last_recorded_at, frequency_weeks)
}

/// Evaluate every routine (due or not), preserving input order
pub fn compute_statuses<Tz: TimeZone>(
    routines: &[Routine],
    records_by_routine: &HashMap<RoutineId, Vec<Record>>,
    reference: &DateTime<Tz>,
) -> Vec<RoutineStatus> {
    let anchor = end_of_week(reference).naive_local();

    routines
        .iter()
        .map(|routine| {
            let last = records_by_routine
                .get(&routine.id)
                .and_then(|records| last_recorded_at(records));
            RoutineStatus {
                routine: routine.clone(),
                last_recorded_at: last,
                due: due_against(anchor, last, routine.frequency_weeks),
            }
        })
        .collect()
}

/// Routines currently due; not-due routines are omitted.
///
/// The done count of a set of routines is `routines.len() - expected.len()`.
pub fn compute_expected<Tz: TimeZone>(
    routines: &[Routine],
    records_by_routine: &HashMap<RoutineId, Vec<Record>>,
    reference: &DateTime<Tz>,
) -> Vec<ExpectedRoutine> {
    compute_statuses(routines, records_by_routine, reference)
        .into_iter()
        .filter(|status| status.due)
        .map(|status| ExpectedRoutine {
            routine_id: status.routine.id,
            title: status.routine.title,
            last_recorded_at: status.last_recorded_at,
        })
        .collect()
}
