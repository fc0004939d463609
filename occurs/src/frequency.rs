//! Frequency models: the value types describing one recurrence axis each.
//!
//! A recurring schedule combines one date-level pattern (daily, weekly or
//! monthly) with a [`DailyWindow`] that picks the time-of-day slots on every
//! selected date.

use jiff::civil::Time;
#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Day of the week, ordered Monday-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn from_jiff(wd: jiff::civil::Weekday) -> Self {
        match wd {
            jiff::civil::Weekday::Monday => Self::Monday,
            jiff::civil::Weekday::Tuesday => Self::Tuesday,
            jiff::civil::Weekday::Wednesday => Self::Wednesday,
            jiff::civil::Weekday::Thursday => Self::Thursday,
            jiff::civil::Weekday::Friday => Self::Friday,
            jiff::civil::Weekday::Saturday => Self::Saturday,
            jiff::civil::Weekday::Sunday => Self::Sunday,
        }
    }

    /// Position in a Monday-first week: Monday=0, Sunday=6.
    pub fn index(self) -> u8 {
        match self {
            Self::Monday => 0,
            Self::Tuesday => 1,
            Self::Wednesday => 2,
            Self::Thursday => 3,
            Self::Friday => 4,
            Self::Saturday => 5,
            Self::Sunday => 6,
        }
    }

    pub fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }

    /// Message key of the day name in a text catalog.
    pub fn text_key(self) -> &'static str {
        match self {
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
            Self::Sunday => "SUNDAY",
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_weekday(&s).ok_or_else(|| serde::de::Error::custom(format!("unknown weekday: {s}")))
    }
}

pub fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Monday),
        "tuesday" | "tue" => Some(Weekday::Tuesday),
        "wednesday" | "wed" => Some(Weekday::Wednesday),
        "thursday" | "thu" => Some(Weekday::Thursday),
        "friday" | "fri" => Some(Weekday::Friday),
        "saturday" | "sat" => Some(Weekday::Saturday),
        "sunday" | "sun" => Some(Weekday::Sunday),
        _ => None,
    }
}

/// Unit of the step between two slots of a repeating daily window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TimeUnit {
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    pub fn seconds(self) -> i64 {
        match self {
            Self::Hours => 3600,
            Self::Minutes => 60,
            Self::Seconds => 1,
        }
    }

    /// Message keys for the (singular, plural) unit words.
    pub fn text_keys(self) -> (&'static str, &'static str) {
        match self {
            Self::Hours => ("HOUR", "HOURS"),
            Self::Minutes => ("MINUTE", "MINUTES"),
            Self::Seconds => ("SECOND", "SECONDS"),
        }
    }
}

/// Time-of-day sub-pattern applied on every date selected by the
/// date-level pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum DailyWindow {
    /// Fires once per selected date at `at`.
    Fixed { at: Time },
    /// Fires at `from`, `from + step`, ... up to and including `to`.
    Repeating {
        every: u32,
        unit: TimeUnit,
        from: Time,
        to: Time,
    },
}

impl DailyWindow {
    pub fn at(at: Time) -> Self {
        Self::Fixed { at }
    }

    pub fn repeating(every: u32, unit: TimeUnit, from: Time, to: Time) -> Self {
        Self::Repeating {
            every,
            unit,
            from,
            to,
        }
    }

    /// Step between slots in seconds; `None` for a fixed time.
    pub fn step_seconds(&self) -> Option<i64> {
        match self {
            Self::Fixed { .. } => None,
            Self::Repeating { every, unit, .. } => Some(*every as i64 * unit.seconds()),
        }
    }
}

/// A set of weekdays repeated every `every_weeks` weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeeklyPattern {
    pub days: Vec<Weekday>,
    pub every_weeks: u32,
}

impl WeeklyPattern {
    pub fn new(days: impl IntoIterator<Item = Weekday>, every_weeks: u32) -> Self {
        Self {
            days: days.into_iter().collect(),
            every_weeks,
        }
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }
}

/// Position of the selected day within a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Ordinal {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl Ordinal {
    /// Zero-based index into the month's matching days; `None` for `Last`.
    pub fn index(self) -> Option<usize> {
        match self {
            Self::First => Some(0),
            Self::Second => Some(1),
            Self::Third => Some(2),
            Self::Fourth => Some(3),
            Self::Last => None,
        }
    }

    pub fn text_key(self) -> &'static str {
        match self {
            Self::First => "FIRST",
            Self::Second => "SECOND_ORDINAL",
            Self::Third => "THIRD",
            Self::Fourth => "FOURTH",
            Self::Last => "LAST",
        }
    }
}

/// Which days of a month count toward an [`Ordinal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DaySelector {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    /// Any calendar day.
    Day,
    /// Monday through Friday.
    Weekday,
    /// Saturday or Sunday.
    WeekendDay,
}

impl DaySelector {
    pub fn matches(self, day: Weekday) -> bool {
        match self {
            Self::Monday => day == Weekday::Monday,
            Self::Tuesday => day == Weekday::Tuesday,
            Self::Wednesday => day == Weekday::Wednesday,
            Self::Thursday => day == Weekday::Thursday,
            Self::Friday => day == Weekday::Friday,
            Self::Saturday => day == Weekday::Saturday,
            Self::Sunday => day == Weekday::Sunday,
            Self::Day => true,
            Self::Weekday => !day.is_weekend(),
            Self::WeekendDay => day.is_weekend(),
        }
    }

    pub fn text_key(self) -> &'static str {
        match self {
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
            Self::Sunday => "SUNDAY",
            Self::Day => "DAY",
            Self::Weekday => "WEEKDAY",
            Self::WeekendDay => "WEEKEND_DAY",
        }
    }
}

impl From<Weekday> for DaySelector {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => Self::Monday,
            Weekday::Tuesday => Self::Tuesday,
            Weekday::Wednesday => Self::Wednesday,
            Weekday::Thursday => Self::Thursday,
            Weekday::Friday => Self::Friday,
            Weekday::Saturday => Self::Saturday,
            Weekday::Sunday => Self::Sunday,
        }
    }
}

/// Monthly date-level pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyPattern {
    /// Day `day` of every `every_months`-th month. Months shorter than `day`
    /// are skipped, never clamped.
    DayOfMonth { day: u8, every_months: u32 },
    /// The `ordinal` day matching `selector` of every `every_months`-th month.
    Ordinal {
        ordinal: Ordinal,
        selector: DaySelector,
        every_months: u32,
    },
}

impl MonthlyPattern {
    pub fn every_months(&self) -> u32 {
        match self {
            Self::DayOfMonth { every_months, .. } | Self::Ordinal { every_months, .. } => {
                *every_months
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_from_jiff_follows_the_calendar() {
        // 2020-01-06 is a Monday.
        let monday = jiff::civil::date(2020, 1, 6);
        for (offset, day) in Weekday::ALL.into_iter().enumerate() {
            let date = monday
                .checked_add(jiff::Span::new().days(offset as i64))
                .unwrap();
            assert_eq!(Weekday::from_jiff(date.weekday()), day);
        }
    }

    #[test]
    fn weekday_index_is_monday_first() {
        assert_eq!(Weekday::Monday.index(), 0);
        assert_eq!(Weekday::Sunday.index(), 6);
        assert!(Weekday::Monday < Weekday::Sunday);
    }

    #[test]
    fn parse_weekday_accepts_short_names() {
        assert_eq!(parse_weekday("Wed"), Some(Weekday::Wednesday));
        assert_eq!(parse_weekday("SUNDAY"), Some(Weekday::Sunday));
        assert_eq!(parse_weekday("funday"), None);
    }

    #[test]
    fn selector_weekday_and_weekend_partition_the_week() {
        for day in Weekday::ALL {
            assert_ne!(
                DaySelector::Weekday.matches(day),
                DaySelector::WeekendDay.matches(day)
            );
            assert!(DaySelector::Day.matches(day));
            assert!(DaySelector::from(day).matches(day));
        }
    }

    #[test]
    fn repeating_window_step() {
        let w = DailyWindow::repeating(
            90,
            TimeUnit::Minutes,
            Time::constant(4, 0, 0, 0),
            Time::constant(8, 0, 0, 0),
        );
        assert_eq!(w.step_seconds(), Some(5400));
        assert_eq!(DailyWindow::at(Time::midnight()).step_seconds(), None);
    }

    #[test]
    fn ordinal_index() {
        assert_eq!(Ordinal::First.index(), Some(0));
        assert_eq!(Ordinal::Fourth.index(), Some(3));
        assert_eq!(Ordinal::Last.index(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn daily_window_serde_shape() {
        let w: DailyWindow = serde_json::from_str(
            r#"{"kind":"repeating","every":2,"unit":"hours","from":"04:00:00","to":"06:00:00"}"#,
        )
        .unwrap();
        assert_eq!(
            w,
            DailyWindow::repeating(
                2,
                TimeUnit::Hours,
                Time::constant(4, 0, 0, 0),
                Time::constant(6, 0, 0, 0)
            )
        );
    }
}
