//! Load a schedule document from JSON and describe it in every bundled locale.

use jiff::civil::DateTime;
use occurs::{Locale, ScheduleConfiguration};

const DOCUMENT: &str = r#"{
  "type": "recurring",
  "unit": "monthly",
  "monthly": {
    "kind": "ordinal",
    "ordinal": "last",
    "day_type": "weekday",
    "every_months": 2
  },
  "daily": {
    "kind": "repeating",
    "every": 90,
    "unit": "minutes",
    "from": "08:00:00",
    "to": "12:00:00"
  },
  "start_date": "2025-01-01",
  "end_date": "2026-01-01"
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let schedule = ScheduleConfiguration::from_json(DOCUMENT)?;
    let now: DateTime = "2025-03-10T09:00:00".parse()?;

    for locale in Locale::ALL {
        let text = occurs::describe(now, &schedule, locale.provider())?;
        println!("{locale}: {text}");
    }

    println!("\nNext: {:?}", schedule.next_from(now)?);
    println!("\nAs stored:\n{}", schedule.to_json()?);

    // Errors carry a catalog key and render in any locale
    let broken = DOCUMENT.replace("\"every_months\": 2", "\"every_months\": 0");
    if let Err(err) = ScheduleConfiguration::from_json(&broken) {
        println!("\n{}: {err}", err.text_key());
        println!("{}", err.localized(Locale::EsEs.provider()));
    }

    Ok(())
}
