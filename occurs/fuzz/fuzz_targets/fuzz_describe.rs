#![no_main]
use jiff::civil::date;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(schedule) = occurs::ScheduleConfiguration::from_json(s) {
            let now = date(2026, 2, 6).at(12, 0, 0, 0);
            // Valid schedules always resolve and render without panicking
            let _ = schedule.next_n_from(now, 8).expect("validated schedule must resolve");
            for locale in occurs::Locale::ALL {
                let _ = occurs::describe(now, &schedule, locale.provider())
                    .expect("validated schedule must render");
            }
        }
    }
});
