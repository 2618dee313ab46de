//! Week-boundary and calendar date utilities
//!
//! Due-ness of cleaning routines and the recipe suggestion window are both
//! measured against the end of the current week rather than the current
//! instant: Sunday at 23:00 in the caller's time zone.

use chrono::{DateTime, Datelike, Days, Duration, Local, NaiveDate, NaiveTime, Offset, TimeZone};

/// Hour of the day (local wall clock) at which a week ends
pub const END_OF_WEEK_HOUR: i64 = 23;

/// Storage and display format for calendar dates (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// End of the calendar week containing `now`.
///
/// Rolls forward to the next Sunday (zero days when `now` is already a
/// Sunday) and pins the time to 23:00:00 in `now`'s time zone.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use home_common::time::end_of_week;
///
/// // Wednesday 2024-01-03 → Sunday 2024-01-07 23:00
/// let now = Utc.with_ymd_and_hms(2024, 1, 3, 9, 30, 0).unwrap();
/// assert_eq!(end_of_week(&now), Utc.with_ymd_and_hms(2024, 1, 7, 23, 0, 0).unwrap());
/// ```
pub fn end_of_week<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let days_forward = (7 - now.weekday().num_days_from_sunday()) % 7;
    let boundary_date = now.date_naive() + Days::new(u64::from(days_forward));
    let boundary = boundary_date.and_time(NaiveTime::MIN) + Duration::hours(END_OF_WEEK_HOUR);

    let tz = now.timezone();
    match tz.from_local_datetime(&boundary).earliest() {
        Some(end) => end,
        // 23:00 falls in a DST gap: use the offset from before the
        // transition, which lands on the first instant after the gap
        None => {
            let before = tz
                .offset_from_utc_datetime(&(boundary - Duration::days(1)))
                .fix();
            tz.from_utc_datetime(&(boundary - before))
        }
    }
}

/// Current calendar date in the local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date for storage or display
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}
