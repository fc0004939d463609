#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Loading should never panic, only return Ok or Err
        if let Ok(schedule) = occurs::ScheduleConfiguration::from_json(s) {
            let json = schedule.to_json().expect("a loaded schedule must serialize");
            let reloaded = occurs::ScheduleConfiguration::from_json(&json)
                .expect("serialized output must load");
            assert_eq!(schedule, reloaded, "document roundtrip changed the schedule");
        }
    }
});
