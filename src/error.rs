use crate::parser::SyntaxError;
use std::error::Error;
use std::fmt;
use std::num::ParseIntError;

/// The reason a [`ParseError`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// The `data:` URI to parse is the empty string.
    EmptyUri,
    /// The scheme is missing or is not `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
    InvalidScheme,
    /// The path starts with `//` and would be confused with an authority.
    InvalidPath,
    /// The port is negative or greater than 65535.
    InvalidPort,
    /// The scheme is well-formed but is neither `http` nor `https`.
    UnsupportedScheme,
    /// The input does not form a valid URI of the requested family.
    InvalidUri,
    /// A `data:` URI parameter is empty or not a single `key=value` pair.
    InvalidParameter,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EmptyUri => "Empty URI",
            Self::InvalidScheme => "Invalid scheme",
            Self::InvalidPath => "Invalid path",
            Self::InvalidPort => "Invalid port",
            Self::UnsupportedScheme => "Unsupported scheme",
            Self::InvalidUri => "Invalid URI",
            Self::InvalidParameter => "Invalid parameter",
        })
    }
}

/// An error raised while extracting the parts of a URI.
///
/// ```
/// use urikit::{parse_uri, ParseErrorKind, SchemeFamily};
///
/// let error = parse_uri("unsupported://host", SchemeFamily::Http).unwrap_err();
/// assert_eq!(error.kind(), ParseErrorKind::UnsupportedScheme);
/// ```
#[derive(Debug)]
pub struct ParseError {
    kind: ParseErrorKind,
    detail: ParseErrorDetail,
}

#[derive(Debug)]
enum ParseErrorDetail {
    None,
    Message(String),
    Syntax(SyntaxError),
    Port(ParseIntError),
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind) -> Self {
        Self {
            kind,
            detail: ParseErrorDetail::None,
        }
    }

    pub(crate) fn with_message(kind: ParseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            detail: ParseErrorDetail::Message(message.into()),
        }
    }

    pub(crate) fn from_syntax(kind: ParseErrorKind, error: SyntaxError) -> Self {
        Self {
            kind,
            detail: ParseErrorDetail::Syntax(error),
        }
    }

    pub(crate) fn from_port(error: ParseIntError) -> Self {
        Self {
            kind: ParseErrorKind::InvalidPort,
            detail: ParseErrorDetail::Port(error),
        }
    }

    /// The reason of this error.
    #[inline]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            ParseErrorDetail::None => write!(f, "{}", self.kind),
            ParseErrorDetail::Message(message) => write!(f, "{}: {}", self.kind, message),
            ParseErrorDetail::Syntax(e) => write!(f, "{}: {}", self.kind, e),
            ParseErrorDetail::Port(e) => write!(f, "{} ({})", self.kind, e),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.detail {
            ParseErrorDetail::Syntax(e) => Some(e),
            ParseErrorDetail::Port(e) => Some(e),
            ParseErrorDetail::None | ParseErrorDetail::Message(_) => None,
        }
    }
}

/// The reason a [`CodecError`] was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CodecErrorKind {
    /// There is nothing to encode.
    EmptyInput,
    /// The input is not Base64, even after padding it with up to two `=`.
    InvalidBase64,
    /// The requested text encoding is not one of the supported [`Charset`](crate::Charset)s.
    UnsupportedEncoding,
}

/// An error raised by the Base64 and text encoding helpers.
#[derive(Debug)]
pub struct CodecError {
    kind: CodecErrorKind,
    detail: CodecErrorDetail,
}

#[derive(Debug)]
enum CodecErrorDetail {
    None,
    Base64(base64::DecodeError),
    Label(String),
}

impl CodecError {
    pub(crate) fn empty_input() -> Self {
        Self {
            kind: CodecErrorKind::EmptyInput,
            detail: CodecErrorDetail::None,
        }
    }

    pub(crate) fn invalid_base64(error: base64::DecodeError) -> Self {
        Self {
            kind: CodecErrorKind::InvalidBase64,
            detail: CodecErrorDetail::Base64(error),
        }
    }

    pub(crate) fn unsupported_encoding(label: impl Into<String>) -> Self {
        Self {
            kind: CodecErrorKind::UnsupportedEncoding,
            detail: CodecErrorDetail::Label(label.into()),
        }
    }

    /// The reason of this error.
    #[inline]
    pub fn kind(&self) -> CodecErrorKind {
        self.kind
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            CodecErrorDetail::None => write!(f, "The input is empty"),
            CodecErrorDetail::Base64(e) => write!(f, "Invalid Base64 input ({})", e),
            CodecErrorDetail::Label(label) => write!(f, "Unsupported text encoding '{}'", label),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if let CodecErrorDetail::Base64(e) = &self.detail {
            Some(e)
        } else {
            None
        }
    }
}
