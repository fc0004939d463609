//! Flat configuration document.
//!
//! Hosts that collect a schedule through a form (or a JSON file) produce a
//! record with one optional field per sub-model. [`ScheduleDocument`] is that
//! record; converting it into a [`ScheduleConfiguration`] checks that exactly
//! the sub-models the schedule needs are present and then validates it.

use jiff::civil::{Date, DateTime};

use crate::config::{
    Recurrence, RecurrenceUnit, ScheduleConfiguration, ScheduleKind, ScheduleType,
    DEFAULT_LOCALE,
};
use crate::error::ConfigError;
use crate::frequency::{DailyWindow, DaySelector, MonthlyPattern, Ordinal, WeeklyPattern};
use crate::validate::{validate, validate_dates};

/// Which monthly variant a [`MonthlySection`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MonthlyKind {
    DayOfMonth,
    Ordinal,
}

/// Monthly sub-model as entered in a form: the fields of both variants, of
/// which only those matching `kind` are read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthlySection {
    pub kind: MonthlyKind,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub day: Option<u8>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub ordinal: Option<Ordinal>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub day_type: Option<DaySelector>,
    pub every_months: u32,
}

impl TryFrom<MonthlySection> for MonthlyPattern {
    type Error = ConfigError;

    fn try_from(section: MonthlySection) -> Result<Self, Self::Error> {
        match section.kind {
            MonthlyKind::DayOfMonth => {
                let day = section.day.ok_or(ConfigError::InvalidDayOfMonth)?;
                Ok(MonthlyPattern::DayOfMonth {
                    day,
                    every_months: section.every_months,
                })
            }
            MonthlyKind::Ordinal => {
                let selector = section.day_type.ok_or(ConfigError::MissingDayType)?;
                let ordinal = section.ordinal.ok_or(ConfigError::MissingOrdinal)?;
                Ok(MonthlyPattern::Ordinal {
                    ordinal,
                    selector,
                    every_months: section.every_months,
                })
            }
        }
    }
}

impl From<MonthlyPattern> for MonthlySection {
    fn from(pattern: MonthlyPattern) -> Self {
        match pattern {
            MonthlyPattern::DayOfMonth { day, every_months } => Self {
                kind: MonthlyKind::DayOfMonth,
                day: Some(day),
                ordinal: None,
                day_type: None,
                every_months,
            },
            MonthlyPattern::Ordinal {
                ordinal,
                selector,
                every_months,
            } => Self {
                kind: MonthlyKind::Ordinal,
                day: None,
                ordinal: Some(ordinal),
                day_type: Some(selector),
                every_months,
            },
        }
    }
}

#[cfg(feature = "serde")]
fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

/// A schedule as a flat record of optional sub-models.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct ScheduleDocument {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub schedule_type: ScheduleType,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub once_at: Option<DateTime>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub unit: Option<RecurrenceUnit>,
    /// Daily interval; absent means every day.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub every_days: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub daily: Option<DailyWindow>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub weekly: Option<WeeklyPattern>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub monthly: Option<MonthlySection>,
    pub start_date: Date,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub end_date: Option<Date>,
    #[cfg_attr(feature = "serde", serde(default = "default_locale"))]
    pub locale: String,
}

impl ScheduleDocument {
    /// An empty document of the given type; every sub-model is absent.
    pub fn new(schedule_type: ScheduleType, start_date: Date) -> Self {
        Self {
            schedule_type,
            once_at: None,
            unit: None,
            every_days: None,
            daily: None,
            weekly: None,
            monthly: None,
            start_date,
            end_date: None,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

fn recurrence_from(doc: &mut ScheduleDocument) -> Result<Recurrence, ConfigError> {
    match doc.unit.ok_or(ConfigError::MissingRecurrenceUnit)? {
        RecurrenceUnit::Daily => Ok(Recurrence::Daily {
            every_days: doc.every_days.unwrap_or(1),
        }),
        RecurrenceUnit::Weekly => doc
            .weekly
            .take()
            .map(Recurrence::Weekly)
            .ok_or(ConfigError::MissingWeeklyFrequency),
        RecurrenceUnit::Monthly => {
            let section = doc
                .monthly
                .take()
                .ok_or(ConfigError::MissingMonthlyFrequency)?;
            MonthlyPattern::try_from(section).map(Recurrence::Monthly)
        }
    }
}

impl TryFrom<ScheduleDocument> for ScheduleConfiguration {
    type Error = ConfigError;

    fn try_from(mut doc: ScheduleDocument) -> Result<Self, Self::Error> {
        let once_at = match doc.schedule_type {
            ScheduleType::Once => doc.once_at,
            ScheduleType::Recurring => None,
        };
        validate_dates(once_at, doc.start_date, doc.end_date)?;

        let kind = match doc.schedule_type {
            ScheduleType::Once => ScheduleKind::Once {
                at: once_at.ok_or(ConfigError::MissingOnceDateTime)?,
            },
            ScheduleType::Recurring => {
                let recurrence = recurrence_from(&mut doc)?;
                let daily = doc.daily.ok_or(ConfigError::MissingDailyFrequency)?;
                ScheduleKind::Recurring { recurrence, daily }
            }
        };

        let config = ScheduleConfiguration {
            kind,
            start_date: doc.start_date,
            end_date: doc.end_date,
            locale: doc.locale,
        };
        validate(&config)?;
        Ok(config)
    }
}

impl From<ScheduleConfiguration> for ScheduleDocument {
    fn from(config: ScheduleConfiguration) -> Self {
        let mut doc = ScheduleDocument::new(config.schedule_type(), config.start_date);
        doc.end_date = config.end_date;
        doc.locale = config.locale;
        match config.kind {
            ScheduleKind::Once { at } => doc.once_at = Some(at),
            ScheduleKind::Recurring { recurrence, daily } => {
                doc.unit = Some(recurrence.unit());
                doc.daily = Some(daily);
                match recurrence {
                    Recurrence::Daily { every_days } => doc.every_days = Some(every_days),
                    Recurrence::Weekly(weekly) => doc.weekly = Some(weekly),
                    Recurrence::Monthly(monthly) => doc.monthly = Some(monthly.into()),
                }
            }
        }
        doc
    }
}

#[cfg(feature = "serde")]
impl ScheduleConfiguration {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let doc: ScheduleDocument =
            serde_json::from_str(json).map_err(|e| ConfigError::document(e.to_string()))?;
        Self::try_from(doc)
    }

    /// Serialize as a JSON configuration document.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(&ScheduleDocument::from(self.clone()))
            .map_err(|e| ConfigError::document(e.to_string()))
    }
}
