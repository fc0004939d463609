use jiff::civil::{Date, DateTime};

use crate::frequency::{DailyWindow, MonthlyPattern, WeeklyPattern};

/// Locale tag used when a configuration does not name one.
pub const DEFAULT_LOCALE: &str = "EN-UK";

/// Whether a schedule fires once or repeatedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScheduleType {
    Once,
    Recurring,
}

/// Top-level cadence of a recurring schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RecurrenceUnit {
    Daily,
    Weekly,
    Monthly,
}

/// Date-level pattern of a recurring schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recurrence {
    /// Every `every_days` days counted from the start date.
    Daily { every_days: u32 },
    Weekly(WeeklyPattern),
    Monthly(MonthlyPattern),
}

impl Recurrence {
    pub fn daily() -> Self {
        Self::Daily { every_days: 1 }
    }

    pub fn unit(&self) -> RecurrenceUnit {
        match self {
            Self::Daily { .. } => RecurrenceUnit::Daily,
            Self::Weekly(_) => RecurrenceUnit::Weekly,
            Self::Monthly(_) => RecurrenceUnit::Monthly,
        }
    }
}

/// What the schedule does: one instant, or a date pattern plus a daily window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleKind {
    Once {
        at: DateTime,
    },
    Recurring {
        recurrence: Recurrence,
        daily: DailyWindow,
    },
}

/// A complete schedule definition.
///
/// Values are built once by the caller and never mutated by the engine.
/// All instants are naive local date-times.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "crate::document::ScheduleDocument",
        into = "crate::document::ScheduleDocument"
    )
)]
pub struct ScheduleConfiguration {
    pub kind: ScheduleKind,
    pub start_date: Date,
    pub end_date: Option<Date>,
    /// Drives text rendering only.
    pub locale: String,
}

impl ScheduleConfiguration {
    /// A schedule that fires once at `at`.
    pub fn once(at: DateTime, start_date: Date) -> Self {
        Self::new(ScheduleKind::Once { at }, start_date)
    }

    /// A recurring schedule.
    pub fn recurring(recurrence: Recurrence, daily: DailyWindow, start_date: Date) -> Self {
        Self::new(ScheduleKind::Recurring { recurrence, daily }, start_date)
    }

    pub fn new(kind: ScheduleKind, start_date: Date) -> Self {
        Self {
            kind,
            start_date,
            end_date: None,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Set the exclusive end date.
    pub fn with_end_date(mut self, end_date: Date) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn schedule_type(&self) -> ScheduleType {
        match self.kind {
            ScheduleKind::Once { .. } => ScheduleType::Once,
            ScheduleKind::Recurring { .. } => ScheduleType::Recurring,
        }
    }

    /// `None` for one-time schedules.
    pub fn recurrence_unit(&self) -> Option<RecurrenceUnit> {
        match &self.kind {
            ScheduleKind::Once { .. } => None,
            ScheduleKind::Recurring { recurrence, .. } => Some(recurrence.unit()),
        }
    }

    pub fn once_at(&self) -> Option<DateTime> {
        match self.kind {
            ScheduleKind::Once { at } => Some(at),
            ScheduleKind::Recurring { .. } => None,
        }
    }

    pub fn daily(&self) -> Option<&DailyWindow> {
        match &self.kind {
            ScheduleKind::Recurring { daily, .. } => Some(daily),
            ScheduleKind::Once { .. } => None,
        }
    }

    pub fn weekly(&self) -> Option<&WeeklyPattern> {
        match &self.kind {
            ScheduleKind::Recurring {
                recurrence: Recurrence::Weekly(weekly),
                ..
            } => Some(weekly),
            _ => None,
        }
    }

    pub fn monthly(&self) -> Option<&MonthlyPattern> {
        match &self.kind {
            ScheduleKind::Recurring {
                recurrence: Recurrence::Monthly(monthly),
                ..
            } => Some(monthly),
            _ => None,
        }
    }
}
