//! Text encodings used to turn text into bytes before Base64 encoding, and back.

use crate::CodecError;
use std::fmt;
use std::str::FromStr;

/// A text encoding.
///
/// UTF-16 and UTF-32 are little-endian without byte order mark.
/// Characters that an encoding cannot represent are written as `?`.
///
/// ```
/// use urikit::Charset;
///
/// assert_eq!(Charset::Utf16.encode("hé"), [0x68, 0, 0xE9, 0]);
/// assert_eq!(Charset::Ascii.encode("hé"), b"h?");
/// assert_eq!("windows-1252".parse::<Charset>().unwrap(), Charset::Windows1252);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Charset {
    Ascii,
    Utf16,
    Utf7,
    #[default]
    Utf8,
    Utf32,
    Iso8859_1,
    Windows1252,
}

impl Charset {
    pub const ALL: [Self; 7] = [
        Self::Ascii,
        Self::Utf16,
        Self::Utf7,
        Self::Utf8,
        Self::Utf32,
        Self::Iso8859_1,
        Self::Windows1252,
    ];

    /// The canonical label of the encoding.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascii => "ASCII",
            Self::Utf16 => "UTF-16",
            Self::Utf7 => "UTF-7",
            Self::Utf8 => "UTF-8",
            Self::Utf32 => "UTF-32",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::Windows1252 => "WINDOWS-1252",
        }
    }

    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::Ascii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
            Self::Utf16 => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Utf7 => utf7::encode(text),
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Utf32 => text.chars().flat_map(|c| u32::from(c).to_le_bytes()).collect(),
            Self::Iso8859_1 => text
                .chars()
                .map(|c| u8::try_from(c).unwrap_or(b'?'))
                .collect(),
            Self::Windows1252 => text.chars().map(windows_1252::encode_char).collect(),
        }
    }

    /// Decodes `bytes`. Malformed sequences are replaced, this never fails.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Ascii => bytes
                .iter()
                .map(|b| if b.is_ascii() { char::from(*b) } else { '?' })
                .collect(),
            Self::Utf16 => {
                let units = bytes
                    .chunks_exact(2)
                    .map(|c| u16::from_le_bytes([c[0], c[1]]));
                let mut text = char::decode_utf16(units)
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect::<String>();
                if bytes.len() % 2 != 0 {
                    text.push(char::REPLACEMENT_CHARACTER);
                }
                text
            }
            Self::Utf7 => utf7::decode(bytes),
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Utf32 => {
                let mut text = bytes
                    .chunks_exact(4)
                    .map(|c| {
                        char::from_u32(u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                            .unwrap_or(char::REPLACEMENT_CHARACTER)
                    })
                    .collect::<String>();
                if bytes.len() % 4 != 0 {
                    text.push(char::REPLACEMENT_CHARACTER);
                }
                text
            }
            Self::Iso8859_1 => bytes.iter().map(|b| char::from(*b)).collect(),
            Self::Windows1252 => bytes.iter().map(|b| windows_1252::decode_byte(*b)).collect(),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Charset {
    type Err = CodecError;

    fn from_str(label: &str) -> Result<Self, CodecError> {
        Ok(match label.trim().to_ascii_lowercase().as_str() {
            "ascii" | "us-ascii" => Self::Ascii,
            "utf-16" | "utf16" | "utf-16le" | "unicode" => Self::Utf16,
            "utf-7" | "utf7" => Self::Utf7,
            "utf-8" | "utf8" => Self::Utf8,
            "utf-32" | "utf32" | "utf-32le" => Self::Utf32,
            "iso-8859-1" | "iso8859-1" | "latin1" | "l1" => Self::Iso8859_1,
            "windows-1252" | "cp1252" => Self::Windows1252,
            _ => return Err(CodecError::unsupported_encoding(label)),
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Charset {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

mod windows_1252 {
    /// Code points of the bytes 0x80 to 0x9F. The unassigned bytes map to the C1 control of the same value.
    const HIGH_CONTROLS: [char; 32] = [
        '\u{20AC}', '\u{81}', '\u{201A}', '\u{192}', '\u{201E}', '\u{2026}', '\u{2020}',
        '\u{2021}', '\u{2C6}', '\u{2030}', '\u{160}', '\u{2039}', '\u{152}', '\u{8D}', '\u{17D}',
        '\u{8F}', '\u{90}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}',
        '\u{2013}', '\u{2014}', '\u{2DC}', '\u{2122}', '\u{161}', '\u{203A}', '\u{153}', '\u{9D}',
        '\u{17E}', '\u{178}',
    ];

    pub fn decode_byte(b: u8) -> char {
        if (0x80..0xA0).contains(&b) {
            HIGH_CONTROLS[usize::from(b - 0x80)]
        } else {
            char::from(b)
        }
    }

    pub fn encode_char(c: char) -> u8 {
        match u8::try_from(c) {
            Ok(b) if !(0x80..0xA0).contains(&b) => b,
            _ => HIGH_CONTROLS
                .iter()
                .position(|h| *h == c)
                .and_then(|i| u8::try_from(i + 0x80).ok())
                .unwrap_or(b'?'),
        }
    }
}

/// [RFC 2152](https://www.ietf.org/rfc/rfc2152) UTF-7.
mod utf7 {
    const BASE64_ALPHABET: &[u8; 64] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

    /// Characters written as themselves: set D and the allowed white spaces.
    fn is_direct(c: char) -> bool {
        c.is_ascii_alphanumeric()
            || matches!(
                c,
                '\'' | '(' | ')' | ',' | '-' | '.' | '/' | ':' | '?' | ' ' | '\t' | '\r' | '\n'
            )
    }

    fn base64_value(b: u8) -> Option<u32> {
        Some(u32::from(match b {
            b'A'..=b'Z' => b - b'A',
            b'a'..=b'z' => b - b'a' + 26,
            b'0'..=b'9' => b - b'0' + 52,
            b'+' => 62,
            b'/' => 63,
            _ => return None,
        }))
    }

    pub fn encode(text: &str) -> Vec<u8> {
        let mut output = Vec::with_capacity(text.len());
        let mut shifted = Vec::new();
        for c in text.chars() {
            if is_direct(c) {
                flush_shifted(&mut shifted, &mut output);
                output.push(c as u8);
            } else if c == '+' && shifted.is_empty() {
                output.extend_from_slice(b"+-");
            } else {
                let mut buffer = [0; 2];
                shifted.extend_from_slice(c.encode_utf16(&mut buffer));
            }
        }
        flush_shifted(&mut shifted, &mut output);
        output
    }

    fn flush_shifted(units: &mut Vec<u16>, output: &mut Vec<u8>) {
        if units.is_empty() {
            return;
        }
        output.push(b'+');
        let mut bits = 0u32;
        let mut bit_count = 0;
        for unit in units.drain(..) {
            bits = (bits << 16) | u32::from(unit);
            bit_count += 16;
            while bit_count >= 6 {
                bit_count -= 6;
                output.push(BASE64_ALPHABET[((bits >> bit_count) & 0x3F) as usize]);
            }
        }
        if bit_count > 0 {
            output.push(BASE64_ALPHABET[((bits << (6 - bit_count)) & 0x3F) as usize]);
        }
        output.push(b'-');
    }

    pub fn decode(bytes: &[u8]) -> String {
        let mut output = String::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            i += 1;
            if b != b'+' {
                output.push(if b.is_ascii() {
                    char::from(b)
                } else {
                    char::REPLACEMENT_CHARACTER
                });
                continue;
            }
            if bytes.get(i) == Some(&b'-') {
                output.push('+');
                i += 1;
                continue;
            }
            let mut units = Vec::new();
            let mut bits = 0u32;
            let mut bit_count = 0;
            while let Some(value) = bytes.get(i).and_then(|b| base64_value(*b)) {
                i += 1;
                bits = ((bits << 6) | value) & 0x3F_FFFF;
                bit_count += 6;
                if bit_count >= 16 {
                    bit_count -= 16;
                    units.push(((bits >> bit_count) & 0xFFFF) as u16);
                }
            }
            if bytes.get(i) == Some(&b'-') {
                i += 1;
            }
            output.extend(
                char::decode_utf16(units).map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)),
            );
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf7() {
        let examples = [
            ("Hi Mom -\u{263A}-!", "Hi Mom -+Jjo--+ACE-"),
            ("A\u{2262}\u{391}.", "A+ImIDkQ-."),
            ("\u{65E5}\u{672C}\u{8A9E}", "+ZeVnLIqe-"),
            ("1 + 1", "1 +- 1"),
            ("\u{1F600}", "+2D3eAA-"),
        ];
        for (text, encoded) in examples {
            assert_eq!(Charset::Utf7.encode(text), encoded.as_bytes(), "{text}");
            assert_eq!(Charset::Utf7.decode(encoded.as_bytes()), text, "{encoded}");
        }
    }

    #[test]
    fn test_utf7_implicit_shift_end() {
        assert_eq!(Charset::Utf7.decode(b"+ZeVnLIqe."), "\u{65E5}\u{672C}\u{8A9E}.");
    }

    #[test]
    fn test_windows_1252() {
        assert_eq!(Charset::Windows1252.encode("€‰ÿ\u{81}"), [0x80, 0x89, 0xFF, 0x81]);
        assert_eq!(Charset::Windows1252.decode(&[0x80, 0x9F, 0xE9]), "€Ÿé");
        assert_eq!(Charset::Windows1252.encode("\u{80}"), b"?");
    }

    #[test]
    fn test_truncated_utf16_and_utf32() {
        assert_eq!(Charset::Utf16.decode(&[0x61, 0, 0x62]), "a\u{FFFD}");
        assert_eq!(Charset::Utf32.decode(&[0x61, 0, 0, 0, 0x62]), "a\u{FFFD}");
    }

    #[test]
    fn test_labels() {
        for charset in Charset::ALL {
            assert_eq!(charset.as_str().parse::<Charset>().unwrap(), charset);
        }
        assert_eq!("latin1".parse::<Charset>().unwrap(), Charset::Iso8859_1);
        assert!("EBCDIC".parse::<Charset>().is_err());
    }
}
