//! Pre-flight structural checks.
//!
//! Checks run in a fixed order and the first violation wins: sentinel dates,
//! start/end ordering, then the unit-specific checks of the recurrence and
//! the daily window.

use jiff::civil::{Date, DateTime};

use crate::calendar::seconds_of_day;
use crate::config::{Recurrence, ScheduleConfiguration, ScheduleKind};
use crate::error::ConfigError;
use crate::frequency::{DailyWindow, MonthlyPattern, WeeklyPattern};

/// Largest valid `day` of a [`MonthlyPattern::DayOfMonth`].
const MAX_DAY_OF_MONTH: u8 = 31;

/// `Date::MAX` stands for "no value" and never names a real calendar day.
fn is_sentinel(date: Date) -> bool {
    date == Date::MAX
}

/// Validate a configuration, returning the first violation found.
pub fn validate(config: &ScheduleConfiguration) -> Result<(), ConfigError> {
    validate_dates(config.once_at(), config.start_date, config.end_date)?;

    match &config.kind {
        ScheduleKind::Once { .. } => Ok(()),
        ScheduleKind::Recurring { recurrence, daily } => {
            validate_recurrence(recurrence)?;
            validate_daily(daily)
        }
    }
}

/// Sentinel and ordering checks shared with the document conversion, which
/// runs them before it knows whether the sub-models are present.
pub(crate) fn validate_dates(
    once_at: Option<DateTime>,
    start_date: Date,
    end_date: Option<Date>,
) -> Result<(), ConfigError> {
    if once_at.is_some_and(|at| is_sentinel(at.date())) {
        return Err(ConfigError::InvalidOnceDate);
    }
    if is_sentinel(start_date) {
        return Err(ConfigError::InvalidStartDate);
    }
    if let Some(end) = end_date {
        if is_sentinel(end) {
            return Err(ConfigError::InvalidEndDate);
        }
        if start_date >= end {
            return Err(ConfigError::EndNotAfterStart);
        }
    }
    Ok(())
}

fn validate_recurrence(recurrence: &Recurrence) -> Result<(), ConfigError> {
    match recurrence {
        Recurrence::Daily { every_days } => {
            if *every_days == 0 {
                return Err(ConfigError::InvalidDailyInterval);
            }
            Ok(())
        }
        Recurrence::Weekly(weekly) => validate_weekly(weekly),
        Recurrence::Monthly(monthly) => validate_monthly(monthly),
    }
}

fn validate_weekly(weekly: &WeeklyPattern) -> Result<(), ConfigError> {
    if weekly.every_weeks == 0 {
        return Err(ConfigError::InvalidWeeklyInterval);
    }
    if weekly.days.is_empty() {
        return Err(ConfigError::NoWeekdays);
    }
    Ok(())
}

fn validate_monthly(monthly: &MonthlyPattern) -> Result<(), ConfigError> {
    if monthly.every_months() == 0 {
        return Err(ConfigError::InvalidMonthlyInterval);
    }
    if let MonthlyPattern::DayOfMonth { day, .. } = monthly {
        if *day == 0 || *day > MAX_DAY_OF_MONTH {
            return Err(ConfigError::InvalidDayOfMonth);
        }
    }
    Ok(())
}

fn validate_daily(daily: &DailyWindow) -> Result<(), ConfigError> {
    match daily {
        DailyWindow::Fixed { .. } => Ok(()),
        DailyWindow::Repeating {
            every, from, to, ..
        } => {
            if *every == 0 {
                return Err(ConfigError::InvalidDailyStep);
            }
            if seconds_of_day(*from) >= seconds_of_day(*to) {
                return Err(ConfigError::InvalidDailyWindow);
            }
            Ok(())
        }
    }
}
