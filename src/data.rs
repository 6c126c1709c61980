use crate::charset::Charset;
use crate::codec::decode_base64_bytes;
use crate::{CodecError, ParseError, ParseErrorKind};
use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;
use std::str::FromStr;

const DEFAULT_MIME_TYPE: &str = "text/plain";
const DEFAULT_CHARSET: &str = "US-ASCII";

/// The parts of an [RFC 2397](https://www.ietf.org/rfc/rfc2397) `data:` URI.
///
/// The payload is kept as written, use [`DataParts::decode`] to get its bytes.
///
/// ```
/// use urikit::DataParts;
///
/// let parts = DataParts::parse(r#"data:application/json;charset=UTF-8,{"message": "moin"}"#).unwrap();
/// assert_eq!(parts.mime_type(), "application/json");
/// assert_eq!(parts.parameter("charset"), Some("UTF-8"));
/// assert!(!parts.base64());
/// assert_eq!(parts.data(), r#"{"message": "moin"}"#);
///
/// let parts = DataParts::parse("data:,").unwrap();
/// assert_eq!(parts.mime_type(), "text/plain");
/// assert_eq!(parts.parameter("charset"), Some("US-ASCII"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize))]
pub struct DataParts {
    mime_type: String,
    parameters: BTreeMap<String, String>,
    base64: bool,
    data: String,
}

impl DataParts {
    /// Parses and validates a `data:` URI.
    pub fn parse(uri: &str) -> Result<Self, ParseError> {
        let result = parse_data_uri(uri);
        if let Err(error) = &result {
            tracing::debug!(uri, %error, "rejected data URI");
        }
        result
    }

    /// Always `data`.
    #[inline]
    pub fn scheme(&self) -> &'static str {
        "data"
    }

    /// The MIME type, `text/plain` if the URI does not set one.
    #[inline]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The parameters with lowercase keys. `charset` is always set.
    #[inline]
    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    #[inline]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// Whether the payload is Base64 encoded.
    #[inline]
    pub fn base64(&self) -> bool {
        self.base64
    }

    /// The payload as written in the URI.
    #[inline]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Decodes the payload: Base64 if [`DataParts::base64`] is set, percent-encoding otherwise.
    ///
    /// ```
    /// use urikit::DataParts;
    ///
    /// assert_eq!(DataParts::parse("data:;base64,SGk").unwrap().decode().unwrap(), b"Hi");
    /// assert_eq!(DataParts::parse("data:,H%69").unwrap().decode().unwrap(), b"Hi");
    /// ```
    pub fn decode(&self) -> Result<Vec<u8>, CodecError> {
        if self.base64 {
            decode_base64_bytes(&percent_decode_str(&self.data).decode_utf8_lossy())
        } else {
            Ok(percent_decode_str(&self.data).collect())
        }
    }

    /// Decodes the payload into text using its `charset` parameter.
    pub fn decode_text(&self) -> Result<String, CodecError> {
        let charset = Charset::from_str(self.parameter("charset").unwrap_or(DEFAULT_CHARSET))?;
        Ok(charset.decode(&self.decode()?))
    }
}

impl FromStr for DataParts {
    type Err = ParseError;

    #[inline]
    fn from_str(uri: &str) -> Result<Self, ParseError> {
        Self::parse(uri)
    }
}

fn parse_data_uri(uri: &str) -> Result<DataParts, ParseError> {
    if uri.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptyUri));
    }
    let rest = match uri.get(..5) {
        Some(scheme) if scheme.eq_ignore_ascii_case("data:") => &uri[5..],
        _ => {
            return Err(ParseError::with_message(
                ParseErrorKind::InvalidUri,
                "the URI does not start with data:",
            ))
        }
    };
    let Some((metadata, data)) = rest.split_once(',') else {
        return Err(ParseError::with_message(
            ParseErrorKind::InvalidUri,
            "no comma separates the metadata from the data",
        ));
    };

    let mut segments = metadata.split(';').peekable();
    let mut mime_type = DEFAULT_MIME_TYPE.to_owned();
    let mut parameters = BTreeMap::new();
    let mut base64 = false;

    // The first segment is a parameter if it contains a '='
    if let Some(first) = segments.next_if(|s| !s.contains('=')) {
        if !first.is_empty() {
            validate_mime_type(first)?;
            mime_type = first.to_owned();
        }
    }
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() && segment.eq_ignore_ascii_case("base64") {
            base64 = true;
        } else {
            let (key, value) = parse_parameter(segment)?;
            parameters.insert(key, value.to_owned());
        }
    }
    parameters
        .entry("charset".to_owned())
        .or_insert_with(|| DEFAULT_CHARSET.to_owned());

    Ok(DataParts {
        mime_type,
        parameters,
        base64,
        data: data.to_owned(),
    })
}

fn parse_parameter(segment: &str) -> Result<(String, &str), ParseError> {
    let mut split = segment.split('=');
    match (split.next(), split.next(), split.next()) {
        (Some(key), Some(value), None) if !key.is_empty() && !value.is_empty() => {
            Ok((key.to_ascii_lowercase(), value))
        }
        _ => Err(ParseError::with_message(
            ParseErrorKind::InvalidParameter,
            format!("'{segment}' is not a key=value pair"),
        )),
    }
}

/// Checks the `type/subtype` shape of RFC 2045.
fn validate_mime_type(mime_type: &str) -> Result<(), ParseError> {
    match mime_type.split_once('/') {
        Some((type_, subtype)) if is_token(type_) && is_token(subtype) => Ok(()),
        _ => Err(ParseError::with_message(
            ParseErrorKind::InvalidUri,
            format!("'{mime_type}' is not a MIME type"),
        )),
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_graphic()
                && !matches!(
                    b,
                    b'(' | b')' | b'<' | b'>' | b'@' | b',' | b';' | b':' | b'\\' | b'"' | b'/'
                        | b'[' | b']' | b'?' | b'='
                )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_parameter() {
        assert_eq!(
            parse_parameter("Charset=UTF-8").unwrap(),
            ("charset".to_owned(), "UTF-8")
        );
        for segment in ["", "charset", "=UTF-8", "charset=", "a=b=c"] {
            assert_eq!(
                parse_parameter(segment).unwrap_err().kind(),
                ParseErrorKind::InvalidParameter,
                "{segment}"
            );
        }
    }

    #[test]
    fn test_validate_mime_type() {
        for mime_type in ["text/plain", "application/ld+json", "image/svg+xml"] {
            assert!(validate_mime_type(mime_type).is_ok(), "{mime_type}");
        }
        for mime_type in ["text", "text/", "/plain", "text/plain/x", "te xt/plain"] {
            assert!(validate_mime_type(mime_type).is_err(), "{mime_type}");
        }
    }
}
