#![no_main]
use libfuzzer_sys::fuzz_target;
use std::str;
use urikit::HttpParts;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = str::from_utf8(data) {
        if let Ok(parts) = HttpParts::parse(s) {
            assert!(parts.path().starts_with('/'), "Path of {} is not absolute", s);
            assert!(!parts.host().is_empty(), "Host of {} is empty", s);
        }
    }
});
