#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Parsing arbitrary TOML must never panic; errors are fine.
        let _ = toml::from_str::<kumbuk::config::Config>(text);
    }
});
