//! Calendar-day and week arithmetic
//!
//! All day comparisons in sistema go through [`calendar_day_key`], which is
//! the local calendar date of a timestamp. Elapsed-day counts use floor
//! division of the millisecond difference, so they depend on the time of
//! day and not only on the calendar date.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeZone};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Local calendar date of `ts`. Serializes as `YYYY-MM-DD`.
pub fn calendar_day_key(ts: &DateTime<Local>) -> NaiveDate {
    ts.date_naive()
}

/// Calendar date of the day before `ts`
pub fn previous_day_key(ts: &DateTime<Local>) -> NaiveDate {
    day_before(ts.date_naive())
}

/// The calendar day before `day`
pub fn day_before(day: NaiveDate) -> NaiveDate {
    day.pred_opt().unwrap_or(day)
}

/// Whole days from `a` to `b`, floored.
pub fn days_between(a: &DateTime<Local>, b: &DateTime<Local>) -> i64 {
    b.signed_duration_since(*a)
        .num_milliseconds()
        .div_euclid(MILLIS_PER_DAY)
}

/// Local midnight at the start of `day`.
pub fn start_of_day(day: NaiveDate) -> DateTime<Local> {
    let midnight = day.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt,
        // Midnight skipped by a DST transition
        None => Local.from_utc_datetime(&midnight),
    }
}

/// Week-of-year number, weeks starting on Sunday.
///
/// Computed as `ceil((days since local Jan 1 + weekday(Jan 1) + 1) / 7)`
/// where the day count is fractional and Sunday is weekday 0. Two instants
/// are in the same week iff their numbers are equal; the year is not part
/// of the number, so week 1 of two different years compare equal.
pub fn week_number(ts: &DateTime<Local>) -> i64 {
    let date = ts.date_naive();
    let jan1 = NaiveDate::from_yo_opt(date.year(), 1).unwrap_or(date);
    let elapsed_days =
        ts.signed_duration_since(start_of_day(jan1)).num_milliseconds() as f64 / MILLIS_PER_DAY as f64;
    let jan1_weekday = jan1.weekday().num_days_from_sunday() as f64;

    ((elapsed_days + jan1_weekday + 1.0) / 7.0).ceil() as i64
}

/// Week number of a calendar-day key, taken at its local midnight.
pub fn week_number_of_day(day: NaiveDate) -> i64 {
    week_number(&start_of_day(day))
}
