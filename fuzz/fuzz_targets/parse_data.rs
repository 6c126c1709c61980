#![no_main]
use libfuzzer_sys::fuzz_target;
use std::str;
use urikit::DataParts;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = str::from_utf8(data) {
        if let Ok(parts) = DataParts::parse(s) {
            assert!(parts.parameter("charset").is_some(), "No charset for {}", s);
            assert!(s.ends_with(parts.data()), "Payload of {} is altered", s);
            let _ = parts.decode();
        }
    }
});
