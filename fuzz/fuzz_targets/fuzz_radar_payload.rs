#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Radar payloads come off the wire; arbitrary bytes must never panic
    // the parser, only produce an error or a partial payload.
    let _ = pour_core::telemetry::parse_radar(data);
});
