#![no_main]
use libfuzzer_sys::fuzz_target;
use urikit::{decode_base64_bytes, encode_base64, Charset};

fuzz_target!(|data: &[u8]| {
    if let Ok(encoded) = encode_base64(data, Charset::Utf8) {
        assert_eq!(decode_base64_bytes(&encoded).unwrap(), data);
        assert_eq!(
            decode_base64_bytes(encoded.trim_end_matches('=')).unwrap(),
            data
        );
    }
});
