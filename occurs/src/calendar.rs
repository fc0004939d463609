//! Calendar helpers: week numbering, Monday-first day ordering and month
//! arithmetic shared by the engine and the renderer.

use jiff::civil::{Date, Time};
use jiff::Span;

use crate::frequency::{DaySelector, Ordinal, Weekday};

/// Monday 1970-01-05, the origin of [`week_index`].
const EPOCH_MONDAY: Date = Date::constant(1970, 1, 5);

const SECONDS_PER_DAY: i64 = 86_400;

/// Week of the year under a Monday-start, first-four-day-week rule: a week
/// belongs to the year that contains its Thursday (ISO 8601).
pub fn week_of_year(date: Date) -> i8 {
    date.iso_week_date().week()
}

/// Continuous week number counted from [`EPOCH_MONDAY`]. Two dates are `k`
/// weeks apart exactly when their indices differ by `k`, across year
/// boundaries too; within one ISO year the difference equals the difference
/// of their [`week_of_year`] values.
pub fn week_index(date: Date) -> i64 {
    days_between(EPOCH_MONDAY, monday_of(date)).div_euclid(7)
}

/// The Monday that starts `date`'s week.
pub fn monday_of(date: Date) -> Date {
    let offset = date.weekday().to_monday_zero_offset() as i64;
    add_days(date, -offset).unwrap_or(date)
}

/// Returns the given days ordered Monday-first, without duplicates.
pub fn ordered_weekdays(days: &[Weekday]) -> Vec<Weekday> {
    let mut ordered = days.to_vec();
    ordered.sort_by_key(|d| d.index());
    ordered.dedup();
    ordered
}

/// Signed number of days from `a` to `b`.
pub fn days_between(a: Date, b: Date) -> i64 {
    a.duration_until(b).as_secs().div_euclid(SECONDS_PER_DAY)
}

/// Signed number of calendar months from `a`'s month to `b`'s month.
pub fn months_between(a: Date, b: Date) -> i64 {
    (b.year() as i64 * 12 + b.month() as i64) - (a.year() as i64 * 12 + a.month() as i64)
}

/// `date` shifted by `days`, or `None` past the supported calendar range.
pub fn add_days(date: Date, days: i64) -> Option<Date> {
    let span = Span::new().try_days(days).ok()?;
    date.checked_add(span).ok()
}

/// First day of the month `months` after `date`'s month.
pub fn add_months_to_first(date: Date, months: i64) -> Option<Date> {
    let span = Span::new().try_months(months).ok()?;
    date.first_of_month().checked_add(span).ok()
}

/// Whole seconds since midnight; sub-second precision is ignored.
pub fn seconds_of_day(time: Time) -> i64 {
    time.hour() as i64 * 3600 + time.minute() as i64 * 60 + time.second() as i64
}

/// Inverse of [`seconds_of_day`]; `None` outside `0..86400`.
pub fn time_from_seconds(seconds: i64) -> Option<Time> {
    if !(0..SECONDS_PER_DAY).contains(&seconds) {
        return None;
    }
    Time::new(
        (seconds / 3600) as i8,
        (seconds % 3600 / 60) as i8,
        (seconds % 60) as i8,
        0,
    )
    .ok()
}

/// Every day of `first`'s month whose weekday matches `selector`, in order.
pub fn matching_days(first: Date, selector: DaySelector) -> Vec<Date> {
    let first = first.first_of_month();
    let mut days = Vec::with_capacity(31);
    for day in 1..=first.days_in_month() {
        let Ok(date) = Date::new(first.year(), first.month(), day) else {
            continue;
        };
        if selector.matches(Weekday::from_jiff(date.weekday())) {
            days.push(date);
        }
    }
    days
}

/// The `ordinal` day matching `selector` in `first`'s month. The whole month
/// is scanned before indexing, so `Last` is exact for months with four or
/// five matches. `None` when the month has too few matches.
pub fn ordinal_day(first: Date, ordinal: Ordinal, selector: DaySelector) -> Option<Date> {
    let days = matching_days(first, selector);
    match ordinal.index() {
        Some(i) => days.get(i).copied(),
        None => days.last().copied(),
    }
}

/// Day `day` of `first`'s month, or `None` when the month is too short.
pub fn day_of_month(first: Date, day: u8) -> Option<Date> {
    if day == 0 || day as i8 > first.days_in_month() {
        return None;
    }
    Date::new(first.year(), first.month(), day as i8).ok()
}
