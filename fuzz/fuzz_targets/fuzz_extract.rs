#![no_main]

use kumbuk::extract::Extractor;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let extractor = Extractor::new();
        let cleaned = extractor.clean(text);
        let _ = extractor.extract(&cleaned);
        let _ = extractor.keywords(&cleaned);
    }
});
