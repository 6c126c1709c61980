//! Percent-encoding and Base64 helpers.

use crate::charset::Charset;
use crate::CodecError;
use base64::prelude::BASE64_STANDARD;
use base64::Engine as _;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Percent-encodes `text` for use in a URL component, writing spaces as `+`.
///
/// Only ASCII alphanumerics and `*-._` are kept as is.
///
/// ```
/// use urikit::encode_url;
///
/// assert_eq!(encode_url("a b&c=d/é"), "a+b%26c%3Dd%2F%C3%A9");
/// ```
pub fn encode_url(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

/// Decodes percent-encoded `text`. Both `+` and `%20` are decoded to a space.
///
/// Invalid escapes are kept as is and invalid UTF-8 is replaced by U+FFFD.
///
/// ```
/// use urikit::decode_url;
///
/// assert_eq!(decode_url("a+b%20c%2B"), "a b c+");
/// ```
pub fn decode_url(text: &str) -> String {
    let text = if text.contains('+') {
        Cow::Owned(text.replace('+', " "))
    } else {
        Cow::Borrowed(text)
    };
    percent_decode_str(&text).decode_utf8_lossy().into_owned()
}

/// What [`encode_base64`] encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base64Input<'a> {
    /// Text converted to bytes with the requested [`Charset`] first.
    Text(&'a str),
    /// Bytes encoded as is, the [`Charset`] is ignored.
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for Base64Input<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for Base64Input<'a> {
    #[inline]
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a [u8]> for Base64Input<'a> {
    #[inline]
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Base64Input<'a> {
    #[inline]
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Base64Input<'a> {
    #[inline]
    fn from(bytes: &'a Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

/// Encodes text or bytes to padded standard Base64.
///
/// ```
/// use urikit::{encode_base64, Charset};
///
/// assert_eq!(encode_base64("Hi", Charset::Utf8).unwrap(), "SGk=");
/// assert_eq!(encode_base64("Hi", Charset::Utf16).unwrap(), "SABpAA==");
/// assert_eq!(encode_base64(b"\xFF\x00", Charset::Utf16).unwrap(), "/wA=");
/// assert!(encode_base64("", Charset::Utf8).is_err());
/// ```
pub fn encode_base64<'a>(
    input: impl Into<Base64Input<'a>>,
    charset: Charset,
) -> Result<String, CodecError> {
    let bytes = match input.into() {
        Base64Input::Text(text) => Cow::Owned(charset.encode(text)),
        Base64Input::Bytes(bytes) => Cow::Borrowed(bytes),
    };
    if bytes.is_empty() {
        return Err(CodecError::empty_input());
    }
    Ok(BASE64_STANDARD.encode(bytes))
}

/// Decodes Base64 to text using `charset`.
///
/// See [`decode_base64_bytes`] for the accepted inputs.
///
/// ```
/// use urikit::{decode_base64, Charset};
///
/// assert_eq!(decode_base64("SGk", Charset::Utf8).unwrap(), "Hi");
/// assert_eq!(decode_base64("SABpAA", Charset::Utf16).unwrap(), "Hi");
/// ```
pub fn decode_base64(input: &str, charset: Charset) -> Result<String, CodecError> {
    Ok(charset.decode(&decode_base64_bytes(input)?))
}

/// Decodes standard Base64 to bytes.
///
/// ASCII white spaces are ignored and up to two missing `=` padding characters are tolerated.
///
/// ```
/// use urikit::decode_base64_bytes;
///
/// assert_eq!(decode_base64_bytes("/wA=").unwrap(), [0xFF, 0x00]);
/// assert_eq!(decode_base64_bytes("/wA").unwrap(), [0xFF, 0x00]);
/// assert!(decode_base64_bytes("/w!").is_err());
/// ```
pub fn decode_base64_bytes(input: &str) -> Result<Vec<u8>, CodecError> {
    let mut input = input.replace(|c: char| c.is_ascii_whitespace(), "");
    let first_error = match BASE64_STANDARD.decode(&input) {
        Ok(bytes) => return Ok(bytes),
        Err(e) => e,
    };
    for _ in 0..2 {
        input.push('=');
        if let Ok(bytes) = BASE64_STANDARD.decode(&input) {
            return Ok(bytes);
        }
    }
    tracing::debug!(error = %first_error, "invalid Base64 input");
    Err(CodecError::invalid_base64(first_error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_is_tolerated() {
        let examples = [
            ("YQ", "a"),
            ("YQ=", "a"),
            ("YQ==", "a"),
            ("YWI", "ab"),
            ("YWI=", "ab"),
        ];
        for (input, expected) in examples {
            assert_eq!(decode_base64_bytes(input).unwrap(), expected.as_bytes(), "{input}");
        }
    }

    #[test]
    fn test_white_spaces_are_ignored() {
        assert_eq!(decode_base64_bytes(" SGVs\nbG8=\r\n").unwrap(), b"Hello");
    }

    #[test]
    fn test_too_much_padding_missing() {
        assert!(decode_base64_bytes("Y").is_err());
        assert!(decode_base64_bytes("YQ===").is_err());
    }

    #[test]
    fn test_decode_url_keeps_invalid_escapes() {
        assert_eq!(decode_url("100%"), "100%");
        assert_eq!(decode_url("%zz"), "%zz");
        assert_eq!(decode_url("%FF"), "\u{FFFD}");
    }
}
