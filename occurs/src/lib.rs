//! occurs — next-occurrence resolution for declarative schedules.
//!
//! A [`ScheduleConfiguration`] is either a one-time instant or a recurring
//! pattern: daily, weekly or monthly dates combined with a time-of-day
//! window. Given a "now", the engine produces the next instant the schedule
//! fires, any number of successive instants, or a localized description.
//!
//! All values are naive local date-times; no time zone is involved.
//!
//! # Examples
//!
//! ```
//! use jiff::civil::{date, time};
//! use occurs::{DailyWindow, Recurrence, ScheduleConfiguration, TimeUnit};
//!
//! let schedule = ScheduleConfiguration::recurring(
//!     Recurrence::daily(),
//!     DailyWindow::repeating(1, TimeUnit::Hours, time(4, 0, 0, 0), time(8, 0, 0, 0)),
//!     date(2020, 1, 8),
//! );
//! let next = schedule.next_from(date(2020, 1, 8).at(6, 0, 0, 0)).unwrap();
//! assert_eq!(next, Some(date(2020, 1, 8).at(7, 0, 0, 0)));
//! ```

pub mod calendar;
pub mod config;
pub mod describe;
pub mod document;
pub mod error;
pub mod eval;
pub mod frequency;
pub mod text;
pub mod validate;

pub use config::{
    Recurrence, RecurrenceUnit, ScheduleConfiguration, ScheduleKind, ScheduleType,
    DEFAULT_LOCALE,
};
pub use describe::describe;
pub use document::{MonthlyKind, MonthlySection, ScheduleDocument};
pub use error::ConfigError;
pub use eval::{next_n_occurrences, next_occurrence, Occurrences};
pub use frequency::{
    DailyWindow, DaySelector, MonthlyPattern, Ordinal, TimeUnit, WeeklyPattern, Weekday,
};
pub use text::{text_provider_for, EnUk, EnUs, EsEs, Locale, TextProvider};
pub use validate::validate;

use jiff::civil::DateTime;

// --- ScheduleConfiguration convenience methods ---

impl ScheduleConfiguration {
    /// Check the configuration without resolving anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate::validate(self)
    }

    /// Compute the next occurrence at or after `now`.
    pub fn next_from(&self, now: DateTime) -> Result<Option<DateTime>, ConfigError> {
        eval::next_occurrence(now, self)
    }

    /// Compute `n` successive occurrence slots starting from `now`.
    pub fn next_n_from(
        &self,
        now: DateTime,
        n: usize,
    ) -> Result<Vec<Option<DateTime>>, ConfigError> {
        eval::next_n_occurrences(now, self, n)
    }

    /// Lazily iterate over occurrences starting from `now`.
    pub fn occurrences(&self, now: DateTime) -> Result<Occurrences<'_>, ConfigError> {
        Occurrences::new(self, now)
    }

    /// Describe the schedule in its own locale.
    pub fn describe(&self, now: DateTime) -> Result<String, ConfigError> {
        describe::describe(now, self, text_provider_for(&self.locale))
    }

    /// The bundled locale this configuration renders with.
    pub fn resolved_locale(&self) -> Locale {
        Locale::from_tag(&self.locale)
    }
}
