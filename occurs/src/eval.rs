//! Recurrence engine.
//!
//! Resolution works on two levels. The date level picks the first date at or
//! after a cursor that the recurrence selects; the time-of-day level picks a
//! slot of the daily window on that date. When the window has no slot left
//! on the cursor's own date, the cursor moves to the next day at midnight
//! and the date level runs again.

use std::iter::FusedIterator;

use jiff::civil::{Date, DateTime, Time};
use tracing::{debug, trace};

use crate::calendar::{
    add_days, add_months_to_first, day_of_month, days_between, monday_of, months_between,
    ordinal_day, seconds_of_day, time_from_seconds, week_index,
};
use crate::config::{Recurrence, ScheduleConfiguration, ScheduleKind};
use crate::error::ConfigError;
use crate::frequency::{DailyWindow, MonthlyPattern, WeeklyPattern, Weekday};
use crate::validate::validate;

/// Date-level passes per resolution. A roll-over always lands on a fresh
/// date whose window is open from midnight, so the second pass resolves.
const MAX_DATE_PASSES: usize = 2;

/// Days the weekly search examines before the schedule counts as exhausted.
/// Weeks outside the interval are skipped without being examined.
const WEEKLY_SEARCH_DAYS: u32 = 365;

/// Aligned months the monthly search examines. Counting aligned months
/// rather than calendar months keeps large intervals reachable.
const MONTHLY_SEARCH_MONTHS: i64 = 24;

/// Compute the next occurrence at or after `now`.
///
/// One-time schedules return `once_at`, or `now` once `once_at` has passed.
/// Recurring schedules return `Ok(None)` when the next candidate date falls
/// on or after the end date, or when the bounded search finds nothing.
pub fn next_occurrence(
    now: DateTime,
    config: &ScheduleConfiguration,
) -> Result<Option<DateTime>, ConfigError> {
    validate(config)?;
    Ok(resolve(now, config))
}

/// Compute `n` successive occurrences. Each slot is resolved from the
/// previous one; once a slot is `None` every later slot is `None` too.
/// A one-time schedule resolves to the same instant in every slot.
pub fn next_n_occurrences(
    now: DateTime,
    config: &ScheduleConfiguration,
    n: usize,
) -> Result<Vec<Option<DateTime>>, ConfigError> {
    validate(config)?;
    let mut slots = Vec::with_capacity(n);
    let mut cursor = Some(now);
    for _ in 0..n {
        cursor = cursor.and_then(|from| resolve(from, config));
        slots.push(cursor);
    }
    Ok(slots)
}

/// Resolve a configuration that has already been validated.
pub(crate) fn resolve(now: DateTime, config: &ScheduleConfiguration) -> Option<DateTime> {
    match &config.kind {
        ScheduleKind::Once { at } => {
            let next = if now > *at { now } else { *at };
            debug!(%now, %next, "resolved one-time schedule");
            Some(next)
        }
        ScheduleKind::Recurring { recurrence, daily } => {
            resolve_recurring(now, config, recurrence, daily)
        }
    }
}

fn resolve_recurring(
    now: DateTime,
    config: &ScheduleConfiguration,
    recurrence: &Recurrence,
    daily: &DailyWindow,
) -> Option<DateTime> {
    let start = config.start_date;
    // Before the start date the cursor jumps to it, keeping now's time.
    let mut cursor = now.date().max(start);
    let mut after = Some(now.time());

    for _ in 0..MAX_DATE_PASSES {
        let candidate = next_date(recurrence, start, cursor)?;
        trace!(%cursor, %candidate, "date-level candidate");

        if let Some(end) = config.end_date {
            if candidate >= end {
                debug!(%now, %candidate, %end, "schedule expired");
                return None;
            }
        }

        let bound = if candidate == cursor { after } else { None };
        if let Some(time) = next_slot(daily, bound) {
            let next = candidate.to_datetime(time);
            debug!(%now, %next, "resolved occurrence");
            return Some(next);
        }

        trace!(date = %candidate, "daily window exhausted, rolling over");
        cursor = add_days(candidate, 1)?;
        after = None;
    }
    None
}

/// First date at or after `cursor` selected by the recurrence.
fn next_date(recurrence: &Recurrence, start: Date, cursor: Date) -> Option<Date> {
    match recurrence {
        Recurrence::Daily { every_days } => next_daily_date(*every_days, start, cursor),
        Recurrence::Weekly(weekly) => next_weekly_date(weekly, start, cursor),
        Recurrence::Monthly(monthly) => next_monthly_date(monthly, start, cursor),
    }
}

fn next_daily_date(every_days: u32, start: Date, cursor: Date) -> Option<Date> {
    let interval = every_days.max(1) as i64;
    let remainder = days_between(start, cursor).rem_euclid(interval);
    if remainder == 0 {
        Some(cursor)
    } else {
        add_days(cursor, interval - remainder)
    }
}

/// Weeks are aligned on continuous week numbers, so an interval keeps its
/// phase across year boundaries.
fn next_weekly_date(weekly: &WeeklyPattern, start: Date, cursor: Date) -> Option<Date> {
    let interval = weekly.every_weeks.max(1) as i64;
    let start_week = week_index(start);
    let mut date = cursor;
    let mut examined = 0;

    while examined < WEEKLY_SEARCH_DAYS {
        let offset = (week_index(date) - start_week).rem_euclid(interval);
        if offset != 0 {
            date = add_days(monday_of(date), (interval - offset) * 7)?;
            continue;
        }
        if weekly.contains(Weekday::from_jiff(date.weekday())) {
            return Some(date);
        }
        date = add_days(date, 1)?;
        examined += 1;
    }
    None
}

/// Months are aligned on the start date's month. Months without a matching
/// day are skipped, never clamped.
fn next_monthly_date(monthly: &MonthlyPattern, start: Date, cursor: Date) -> Option<Date> {
    let interval = monthly.every_months().max(1) as i64;
    let elapsed = months_between(start, cursor).max(0);
    let first_step = (elapsed + interval - 1) / interval;

    for step in first_step..first_step + MONTHLY_SEARCH_MONTHS {
        let first = add_months_to_first(start, step * interval)?;
        let day = match *monthly {
            MonthlyPattern::DayOfMonth { day, .. } => day_of_month(first, day),
            MonthlyPattern::Ordinal {
                ordinal, selector, ..
            } => ordinal_day(first, ordinal, selector),
        };
        match day {
            Some(day) if day >= cursor => return Some(day),
            Some(_) => {}
            None => trace!(month = %first, "month has no matching day"),
        }
    }
    None
}

/// Slot of the daily window strictly after `after`; `None` as the bound
/// means the whole day is open, midnight included.
fn next_slot(daily: &DailyWindow, after: Option<Time>) -> Option<Time> {
    let after = after.map(seconds_of_day);
    match *daily {
        DailyWindow::Fixed { at } => match after {
            Some(after) if after >= seconds_of_day(at) => None,
            _ => Some(at),
        },
        DailyWindow::Repeating { from, to, .. } => {
            let step = daily.step_seconds().filter(|s| *s > 0)?;
            let (from, to) = (seconds_of_day(from), seconds_of_day(to));
            let slot = match after {
                Some(after) if after >= from => from + ((after - from) / step + 1) * step,
                _ => from,
            };
            if slot > to {
                return None;
            }
            time_from_seconds(slot)
        }
    }
}

/// Lazy iterator over successive occurrences.
///
/// Each item is resolved from the previous one, so the sequence can be
/// restarted at any point by building a new iterator from the last value
/// seen. It ends at the first "no further occurrence". Items are distinct
/// instants, so a one-time schedule yields exactly one item where
/// [`next_n_occurrences`] repeats it in every slot.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    config: &'a ScheduleConfiguration,
    cursor: Option<DateTime>,
}

impl<'a> Occurrences<'a> {
    /// Validate `config` and iterate from `from`.
    pub fn new(config: &'a ScheduleConfiguration, from: DateTime) -> Result<Self, ConfigError> {
        validate(config)?;
        Ok(Self {
            config,
            cursor: Some(from),
        })
    }
}

impl Iterator for Occurrences<'_> {
    type Item = DateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let from = self.cursor.take()?;
        let next = resolve(from, self.config)?;
        if let ScheduleKind::Recurring { .. } = self.config.kind {
            self.cursor = Some(next);
        }
        Some(next)
    }
}

impl FusedIterator for Occurrences<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::{DaySelector, Ordinal, TimeUnit};
    use jiff::civil::{date, time};

    fn hourly(from: i8, to: i8) -> DailyWindow {
        DailyWindow::repeating(1, TimeUnit::Hours, time(from, 0, 0, 0), time(to, 0, 0, 0))
    }

    fn daily(window: DailyWindow, start: Date) -> ScheduleConfiguration {
        ScheduleConfiguration::recurring(Recurrence::daily(), window, start)
    }

    fn at(y: i16, m: i8, d: i8, h: i8, min: i8, s: i8) -> DateTime {
        date(y, m, d).at(h, min, s, 0)
    }

    #[test]
    fn once_returns_once_at_or_now() {
        let when = at(2020, 1, 8, 14, 0, 0);
        let cfg = ScheduleConfiguration::once(when, date(2020, 1, 1));
        let before = at(2020, 1, 4, 0, 0, 0);
        let after = at(2020, 1, 9, 0, 0, 0);
        assert_eq!(next_occurrence(before, &cfg).unwrap(), Some(when));
        assert_eq!(next_occurrence(when, &cfg).unwrap(), Some(when));
        assert_eq!(next_occurrence(after, &cfg).unwrap(), Some(after));
    }

    #[test]
    fn daily_window_steps_then_rolls_over() {
        let cfg = daily(hourly(4, 8), date(2020, 1, 8));
        let mut now = at(2020, 1, 8, 6, 0, 0);
        let expected = [
            at(2020, 1, 8, 7, 0, 0),
            at(2020, 1, 8, 8, 0, 0),
            at(2020, 1, 9, 4, 0, 0),
        ];
        for want in expected {
            let got = next_occurrence(now, &cfg).unwrap().unwrap();
            assert_eq!(got, want);
            now = got;
        }
    }

    #[test]
    fn daily_window_between_slots() {
        let cfg = daily(
            DailyWindow::repeating(
                90,
                TimeUnit::Minutes,
                time(4, 0, 0, 0),
                time(8, 0, 0, 0),
            ),
            date(2020, 1, 1),
        );
        // Slots: 04:00, 05:30, 07:00. 08:00 is not on the grid.
        assert_eq!(
            next_occurrence(at(2020, 1, 8, 5, 0, 0), &cfg).unwrap(),
            Some(at(2020, 1, 8, 5, 30, 0))
        );
        assert_eq!(
            next_occurrence(at(2020, 1, 8, 7, 0, 0), &cfg).unwrap(),
            Some(at(2020, 1, 9, 4, 0, 0))
        );
        assert_eq!(
            next_occurrence(at(2020, 1, 8, 1, 0, 0), &cfg).unwrap(),
            Some(at(2020, 1, 8, 4, 0, 0))
        );
    }

    #[test]
    fn fixed_midnight_advances_a_day() {
        let cfg = daily(DailyWindow::at(Time::midnight()), date(2020, 1, 1));
        assert_eq!(
            next_occurrence(at(2020, 1, 4, 0, 0, 0), &cfg).unwrap(),
            Some(at(2020, 1, 5, 0, 0, 0))
        );
    }

    #[test]
    fn fixed_time_before_and_after() {
        let cfg = daily(DailyWindow::at(time(9, 30, 0, 0)), date(2020, 1, 1));
        assert_eq!(
            next_occurrence(at(2020, 3, 1, 9, 29, 59), &cfg).unwrap(),
            Some(at(2020, 3, 1, 9, 30, 0))
        );
        assert_eq!(
            next_occurrence(at(2020, 3, 1, 9, 30, 0), &cfg).unwrap(),
            Some(at(2020, 3, 2, 9, 30, 0))
        );
    }

    #[test]
    fn anchors_to_start_date_keeping_time() {
        let cfg = daily(hourly(4, 8), date(2020, 1, 8));
        assert_eq!(
            next_occurrence(at(2020, 1, 1, 5, 10, 0), &cfg).unwrap(),
            Some(at(2020, 1, 8, 6, 0, 0))
        );
        assert_eq!(
            next_occurrence(at(2020, 1, 1, 2, 0, 0), &cfg).unwrap(),
            Some(at(2020, 1, 8, 4, 0, 0))
        );
    }

    #[test]
    fn every_n_days_aligns_to_start() {
        let cfg = ScheduleConfiguration::recurring(
            Recurrence::Daily { every_days: 3 },
            DailyWindow::at(time(10, 0, 0, 0)),
            date(2020, 1, 1),
        );
        assert_eq!(
            next_occurrence(at(2020, 1, 2, 0, 0, 0), &cfg).unwrap(),
            Some(at(2020, 1, 4, 10, 0, 0))
        );
        assert_eq!(
            next_occurrence(at(2020, 1, 4, 10, 0, 0), &cfg).unwrap(),
            Some(at(2020, 1, 7, 10, 0, 0))
        );
    }

    #[test]
    fn weekly_interval_from_start_week() {
        let cfg = ScheduleConfiguration::recurring(
            Recurrence::Weekly(WeeklyPattern::new([Weekday::Monday], 3)),
            DailyWindow::repeating(2, TimeUnit::Hours, time(4, 0, 0, 0), time(6, 0, 0, 0)),
            date(2020, 1, 8),
        );
        let found = next_n_occurrences(at(2020, 1, 1, 12, 15, 10), &cfg, 3).unwrap();
        assert_eq!(
            found,
            vec![
                Some(at(2020, 1, 27, 4, 0, 0)),
                Some(at(2020, 1, 27, 6, 0, 0)),
                Some(at(2020, 2, 17, 4, 0, 0)),
            ]
        );
    }

    #[test]
    fn weekly_several_days_in_one_week() {
        let cfg = ScheduleConfiguration::recurring(
            Recurrence::Weekly(WeeklyPattern::new(
                [Weekday::Friday, Weekday::Monday, Weekday::Wednesday],
                2,
            )),
            DailyWindow::at(time(9, 0, 0, 0)),
            date(2020, 1, 6),
        );
        let dates: Vec<Date> = Occurrences::new(&cfg, at(2020, 1, 6, 0, 0, 0))
            .unwrap()
            .take(5)
            .map(|dt| dt.date())
            .collect();
        assert_eq!(
            dates,
            vec![
                date(2020, 1, 6),
                date(2020, 1, 8),
                date(2020, 1, 10),
                date(2020, 1, 20),
                date(2020, 1, 22),
            ]
        );
    }

    #[test]
    fn weekly_interval_keeps_phase_across_new_year() {
        // 2020 has 53 ISO weeks; raw week numbers would lose the phase here.
        let cfg = ScheduleConfiguration::recurring(
            Recurrence::Weekly(WeeklyPattern::new([Weekday::Monday], 2)),
            DailyWindow::at(time(9, 0, 0, 0)),
            date(2020, 12, 21),
        );
        let dates: Vec<Date> = Occurrences::new(&cfg, at(2020, 12, 21, 0, 0, 0))
            .unwrap()
            .take(3)
            .map(|dt| dt.date())
            .collect();
        assert_eq!(
            dates,
            vec![date(2020, 12, 21), date(2021, 1, 4), date(2021, 1, 18)]
        );
    }

    #[test]
    fn monthly_second_monday_every_three_months() {
        let cfg = ScheduleConfiguration::recurring(
            Recurrence::Monthly(MonthlyPattern::Ordinal {
                ordinal: Ordinal::Second,
                selector: DaySelector::Monday,
                every_months: 3,
            }),
            hourly(3, 6),
            date(2020, 1, 1),
        );
        let found = next_n_occurrences(at(2020, 1, 1, 0, 0, 0), &cfg, 5).unwrap();
        assert_eq!(
            found,
            vec![
                Some(at(2020, 1, 13, 3, 0, 0)),
                Some(at(2020, 1, 13, 4, 0, 0)),
                Some(at(2020, 1, 13, 5, 0, 0)),
                Some(at(2020, 1, 13, 6, 0, 0)),
                Some(at(2020, 4, 13, 3, 0, 0)),
            ]
        );
    }

    #[test]
    fn monthly_day_of_month_interval() {
        let cfg = ScheduleConfiguration::recurring(
            Recurrence::Monthly(MonthlyPattern::DayOfMonth {
                day: 5,
                every_months: 2,
            }),
            DailyWindow::at(time(9, 0, 0, 0)),
            date(2020, 1, 8),
        );
        assert_eq!(
            next_occurrence(at(2020, 1, 1, 0, 0, 0), &cfg).unwrap(),
            Some(at(2020, 3, 5, 9, 0, 0))
        );
    }

    #[test]
    fn monthly_day_skips_short_months() {
        let cfg = ScheduleConfiguration::recurring(
            Recurrence::Monthly(MonthlyPattern::DayOfMonth {
                day: 31,
                every_months: 1,
            }),
            DailyWindow::at(time(9, 0, 0, 0)),
            date(2021, 1, 1),
        );
        let dates: Vec<Date> = Occurrences::new(&cfg, at(2021, 1, 31, 12, 0, 0))
            .unwrap()
            .take(2)
            .map(|dt| dt.date())
            .collect();
        assert_eq!(dates, vec![date(2021, 3, 31), date(2021, 5, 31)]);
    }

    #[test]
    fn monthly_never_matching_is_exhausted() {
        let cfg = ScheduleConfiguration::recurring(
            Recurrence::Monthly(MonthlyPattern::DayOfMonth {
                day: 30,
                every_months: 12,
            }),
            DailyWindow::at(time(9, 0, 0, 0)),
            date(2020, 2, 1),
        );
        assert_eq!(next_occurrence(at(2020, 2, 1, 0, 0, 0), &cfg).unwrap(), None);
    }

    #[test]
    fn end_date_is_exclusive() {
        let cfg = daily(hourly(4, 8), date(2020, 1, 8)).with_end_date(date(2020, 1, 9));
        let found = next_n_occurrences(at(2020, 1, 8, 6, 0, 0), &cfg, 4).unwrap();
        assert_eq!(
            found,
            vec![
                Some(at(2020, 1, 8, 7, 0, 0)),
                Some(at(2020, 1, 8, 8, 0, 0)),
                None,
                None
            ]
        );
    }

    #[test]
    fn once_repeats_in_every_slot() {
        let when = at(2020, 1, 8, 14, 0, 0);
        let cfg = ScheduleConfiguration::once(when, date(2020, 1, 1));
        assert_eq!(
            next_n_occurrences(at(2020, 1, 1, 0, 0, 0), &cfg, 3).unwrap(),
            vec![Some(when); 3]
        );
        let late = at(2020, 1, 9, 10, 0, 0);
        assert_eq!(
            next_n_occurrences(late, &cfg, 3).unwrap(),
            vec![Some(late); 3]
        );
        // Chaining by hand gives the same slots.
        let first = next_occurrence(at(2020, 1, 1, 0, 0, 0), &cfg).unwrap().unwrap();
        assert_eq!(next_occurrence(first, &cfg).unwrap(), Some(when));
        assert!(next_n_occurrences(at(2020, 1, 1, 0, 0, 0), &cfg, 0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let cfg = daily(hourly(8, 4), date(2020, 1, 1));
        assert_eq!(
            next_occurrence(at(2020, 1, 1, 0, 0, 0), &cfg),
            Err(ConfigError::InvalidDailyWindow)
        );
        assert_eq!(
            next_n_occurrences(at(2020, 1, 1, 0, 0, 0), &cfg, 2),
            Err(ConfigError::InvalidDailyWindow)
        );
        assert!(Occurrences::new(&cfg, at(2020, 1, 1, 0, 0, 0)).is_err());
    }

    #[test]
    fn end_of_calendar_is_no_occurrence() {
        let cfg = daily(hourly(4, 8), date(2020, 1, 1));
        assert_eq!(
            next_occurrence(at(9999, 12, 31, 23, 0, 0), &cfg).unwrap(),
            None
        );
    }

    #[test]
    fn next_slot_bounds() {
        let window = hourly(4, 8);
        assert_eq!(next_slot(&window, None), Some(time(4, 0, 0, 0)));
        assert_eq!(next_slot(&window, Some(time(7, 59, 59, 0))), Some(time(8, 0, 0, 0)));
        assert_eq!(next_slot(&window, Some(time(8, 0, 0, 0))), None);
        let fixed = DailyWindow::at(Time::midnight());
        assert_eq!(next_slot(&fixed, None), Some(Time::midnight()));
        assert_eq!(next_slot(&fixed, Some(Time::midnight())), None);
    }
}
