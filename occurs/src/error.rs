use thiserror::Error;

use crate::text::TextProvider;

/// Reasons a schedule configuration is rejected.
///
/// Every variant is detected before any date arithmetic runs. "No further
/// occurrence" is never an error; the engine reports it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("The specified date is not valid")]
    InvalidOnceDate,

    #[error("The specified start date is not valid")]
    InvalidStartDate,

    #[error("The specified end date is not valid")]
    InvalidEndDate,

    #[error("The end date must come after the start date")]
    EndNotAfterStart,

    #[error("Type \"Once\" was indicated, but not the date and time")]
    MissingOnceDateTime,

    #[error("No frequency of execution was specified")]
    MissingRecurrenceUnit,

    #[error("No daily frequency was specified")]
    MissingDailyFrequency,

    #[error("No weekly frequency was specified")]
    MissingWeeklyFrequency,

    #[error("No monthly frequency was specified")]
    MissingMonthlyFrequency,

    #[error("No valid day of the week was indicated")]
    NoWeekdays,

    #[error("Incorrect weekly frequency")]
    InvalidWeeklyInterval,

    #[error("The specified monthly interval is invalid")]
    InvalidMonthlyInterval,

    #[error("The specified day of execution is invalid")]
    InvalidDayOfMonth,

    #[error("No day type was specified")]
    MissingDayType,

    #[error("No ordinal position was specified")]
    MissingOrdinal,

    #[error("The daily start time must come before the daily end time")]
    InvalidDailyWindow,

    #[error("The daily recurrence step must be greater than zero")]
    InvalidDailyStep,

    #[error("The specified daily interval is invalid")]
    InvalidDailyInterval,

    #[error("invalid configuration document: {0}")]
    Document(String),
}

impl ConfigError {
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document(message.into())
    }

    /// Message key used to look this error up in a [`TextProvider`].
    pub fn text_key(&self) -> &'static str {
        match self {
            Self::InvalidOnceDate => "INVALID_DATE",
            Self::InvalidStartDate => "INVALID_STARTDATE",
            Self::InvalidEndDate => "INVALID_ENDDATE",
            Self::EndNotAfterStart => "END_DATE_AFTER_START",
            Self::MissingOnceDateTime => "NO_ONCE_DATETIME",
            Self::MissingRecurrenceUnit => "NO_FREQUENCY",
            Self::MissingDailyFrequency => "NO_DAILY_FREQUENCY",
            Self::MissingWeeklyFrequency => "NO_WEEKLY_FREQUENCY",
            Self::MissingMonthlyFrequency => "NO_MONTHLY_FREQUENCY",
            Self::NoWeekdays => "NO_VALID_WEEKDAY",
            Self::InvalidWeeklyInterval => "INCORRECT_WEEKLY_FREQUENCY",
            Self::InvalidMonthlyInterval => "INVALID_INTERVAL",
            Self::InvalidDayOfMonth => "INVALID_DAY",
            Self::MissingDayType => "NO_DAY_TYPE",
            Self::MissingOrdinal => "NO_ORDINAL",
            Self::InvalidDailyWindow => "INVALID_DAILY_WINDOW",
            Self::InvalidDailyStep => "INVALID_DAILY_STEP",
            Self::InvalidDailyInterval => "INVALID_DAILY_INTERVAL",
            Self::Document(_) => "INVALID_DOCUMENT",
        }
    }

    /// Render the error through a text provider, falling back to the
    /// built-in English message when the provider has no entry for it.
    pub fn localized(&self, texts: &dyn TextProvider) -> String {
        let text = texts.get_text(self.text_key());
        match self {
            Self::Document(detail) if !text.is_empty() => format!("{text}: {detail}"),
            _ if !text.is_empty() => text.to_string(),
            _ => self.to_string(),
        }
    }
}
