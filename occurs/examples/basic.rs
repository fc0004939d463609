//! Basic occurs API walkthrough: build, validate, resolve, iterate.

use jiff::civil::{date, time, DateTime};
use occurs::{DailyWindow, Recurrence, ScheduleConfiguration, TimeUnit, WeeklyPattern, Weekday};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Every other week on Monday and Thursday, hourly from 09:00 to 12:00
    let schedule = ScheduleConfiguration::recurring(
        Recurrence::Weekly(WeeklyPattern::new(
            [Weekday::Monday, Weekday::Thursday],
            2,
        )),
        DailyWindow::repeating(1, TimeUnit::Hours, time(9, 0, 0, 0), time(12, 0, 0, 0)),
        date(2025, 6, 2),
    )
    .with_end_date(date(2025, 9, 1));
    schedule.validate()?;
    println!("{}", schedule.describe(date(2025, 6, 1).at(0, 0, 0, 0))?);

    // Compute the next occurrence
    let now: DateTime = "2025-06-15T08:00:00".parse()?;
    if let Some(next) = schedule.next_from(now)? {
        println!("\nNext occurrence after {now}: {next}");
    }

    // Compute the next 5 occurrences
    println!("\nNext 5 occurrences:");
    for slot in schedule.next_n_from(now, 5)? {
        match slot {
            Some(dt) => println!("  {dt}"),
            None => println!("  -"),
        }
    }

    // Iterate lazily up to the end date
    let count = schedule.occurrences(now)?.count();
    println!("\n{count} occurrences left before {}", date(2025, 9, 1));

    // A one-time schedule
    let once = ScheduleConfiguration::once(date(2025, 7, 4).at(18, 30, 0, 0), date(2025, 6, 1));
    println!("\n{}", once.describe(now)?);
    println!("Fires at {:?}", once.next_from(now)?);

    Ok(())
}
