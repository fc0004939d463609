//! Human-readable schedule descriptions.
//!
//! The renderer owns only the sentence structure. Words, templates and the
//! date pattern all come from a [`TextProvider`], so a missing key degrades
//! to a shorter sentence instead of failing.

use jiff::civil::{Date, DateTime, Time};

use crate::calendar::ordered_weekdays;
use crate::config::{Recurrence, ScheduleConfiguration, ScheduleKind};
use crate::error::ConfigError;
use crate::eval::next_occurrence;
use crate::frequency::{DailyWindow, MonthlyPattern, WeeklyPattern};
use crate::text::{fill, TextProvider};

/// Describe `config` as seen from `now`.
///
/// Schedules with no further occurrence get an expiry sentence naming the
/// end date. Everything else gets the schedule clause, the daily window
/// clause and a trailing "starting on" clause.
pub fn describe(
    now: DateTime,
    config: &ScheduleConfiguration,
    texts: &dyn TextProvider,
) -> Result<String, ConfigError> {
    let Some(next) = next_occurrence(now, config)? else {
        return Ok(match config.end_date {
            Some(end) => fill(texts.get_text("DATE_OVER_END"), &[&format_date(end, texts)]),
            None => texts.get_text("NO_OCCURRENCE").to_string(),
        });
    };

    let mut clauses = match &config.kind {
        ScheduleKind::Once { .. } => vec![fill(
            texts.get_text("ONCE_OCCURRENCE"),
            &[&format_date(next.date(), texts), &hour_minute(next.time())],
        )],
        ScheduleKind::Recurring { recurrence, daily } => vec![
            recurrence_clause(recurrence, texts),
            daily_clause(daily, texts),
        ],
    };
    clauses.push(format!(
        "{} {}",
        texts.get_text("STARTING_ON"),
        format_date(config.start_date, texts)
    ));

    Ok(join_clauses(&clauses))
}

/// Join non-empty clauses with single spaces.
fn join_clauses(clauses: &[String]) -> String {
    clauses
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a date with the provider's `DATE_FORMAT`, or ISO 8601 when the
/// pattern is missing or malformed.
fn format_date(date: Date, texts: &dyn TextProvider) -> String {
    let pattern = texts.get_text("DATE_FORMAT");
    if pattern.is_empty() {
        return date.to_string();
    }
    jiff::fmt::strtime::format(pattern, date).unwrap_or_else(|_| date.to_string())
}

fn hour_minute(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

fn clock(time: Time) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// Singular word for a quantity of one, plural otherwise.
fn unit_word<'a>(texts: &'a dyn TextProvider, n: u32, singular: &str, plural: &str) -> &'a str {
    texts.get_text(if n == 1 { singular } else { plural })
}

fn recurrence_clause(recurrence: &Recurrence, texts: &dyn TextProvider) -> String {
    match recurrence {
        Recurrence::Daily { every_days: 1 } => texts.get_text("OCCURS_EVERYDAY").to_string(),
        Recurrence::Daily { every_days } => {
            fill(texts.get_text("OCCURS_EVERY_N_DAYS"), &[every_days])
        }
        Recurrence::Weekly(weekly) => weekly_clause(weekly, texts),
        Recurrence::Monthly(monthly) => monthly_clause(monthly, texts),
    }
}

fn weekly_clause(weekly: &WeeklyPattern, texts: &dyn TextProvider) -> String {
    let weeks = unit_word(texts, weekly.every_weeks, "WEEK", "WEEKS");
    fill(
        texts.get_text("OCCURRENCE_STR"),
        &[&weekly.every_weeks, &weeks, &day_list(weekly, texts)],
    )
}

/// Monday-first day names with the connective before the last one:
/// "monday, wednesday and friday".
fn day_list(weekly: &WeeklyPattern, texts: &dyn TextProvider) -> String {
    let names: Vec<String> = ordered_weekdays(&weekly.days)
        .into_iter()
        .map(|day| texts.get_text(day.text_key()).to_lowercase())
        .collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => {
            let and = texts.get_text("ADDITION");
            let head = rest.join(", ");
            if and.is_empty() {
                format!("{head}, {last}")
            } else {
                format!("{head} {and} {last}")
            }
        }
    }
}

fn monthly_clause(monthly: &MonthlyPattern, texts: &dyn TextProvider) -> String {
    let every = monthly.every_months();
    let months = unit_word(texts, every, "MONTH", "MONTHS");
    match *monthly {
        MonthlyPattern::DayOfMonth { day, .. } => fill(
            texts.get_text("DAILY_OCCURRENCE"),
            &[&day, &every, &months],
        ),
        MonthlyPattern::Ordinal {
            ordinal, selector, ..
        } => fill(
            texts.get_text("RECURRING_OCCURENCE"),
            &[
                &texts.get_text(ordinal.text_key()),
                &texts.get_text(selector.text_key()),
                &every,
                &months,
            ],
        ),
    }
}

fn daily_clause(daily: &DailyWindow, texts: &dyn TextProvider) -> String {
    match *daily {
        DailyWindow::Fixed { at } => fill(texts.get_text("OCCURRENCE_STR_ONCE"), &[&clock(at)]),
        DailyWindow::Repeating {
            every,
            unit,
            from,
            to,
        } => {
            let (singular, plural) = unit.text_keys();
            fill(
                texts.get_text("OCCURRENCE_STR_RECURRING"),
                &[
                    &every,
                    &unit_word(texts, every, singular, plural),
                    &clock(from),
                    &clock(to),
                ],
            )
        }
    }
}
