use crate::parser::{AbsoluteUri, SyntaxErrorKind};
use crate::parts::Query;
use crate::{ParseError, ParseErrorKind};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// The scheme of an [`HttpParts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize))]
pub enum HttpScheme {
    Http,
    Https,
}

impl HttpScheme {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// 80 for `http` and 443 for `https`.
    #[inline]
    pub fn default_port(self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }

    fn from_scheme(scheme: &str) -> Option<Self> {
        if scheme.eq_ignore_ascii_case("http") {
            Some(Self::Http)
        } else if scheme.eq_ignore_ascii_case("https") {
            Some(Self::Https)
        } else {
            None
        }
    }
}

impl fmt::Display for HttpScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parts of an `http` or `https` URI.
///
/// If the URI has no scheme, `https` is assumed when it targets the port 443 and `http` otherwise.
///
/// ```
/// use urikit::HttpParts;
///
/// let parts = HttpParts::parse("https://user:password@[::1]:8080/index.php?q1=a&q2=123#anchor").unwrap();
/// assert_eq!(parts.scheme(), "https");
/// assert_eq!(parts.user(), "user");
/// assert_eq!(parts.password(), "password");
/// assert_eq!(parts.host(), "[::1]");
/// assert_eq!(parts.port(), 8080);
/// assert_eq!(parts.path(), "/index.php");
/// assert_eq!(parts.query().get("q2"), Some("123"));
/// assert_eq!(parts.fragment(), "anchor");
///
/// let parts = HttpParts::parse("www.example.com:443").unwrap();
/// assert_eq!(parts.scheme(), "https");
/// assert_eq!(parts.port(), 443);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize))]
pub struct HttpParts {
    scheme: HttpScheme,
    user: String,
    password: String,
    host: String,
    port: u16,
    path: String,
    query: Query,
    fragment: String,
}

impl HttpParts {
    /// Parses and validates an `http` or `https` URI.
    pub fn parse(uri: &str) -> Result<Self, ParseError> {
        let result = Self::parse_absolute(&with_scheme(uri)?);
        if let Err(error) = &result {
            tracing::debug!(uri, %error, "rejected HTTP URI");
        }
        result
    }

    fn parse_absolute(uri: &str) -> Result<Self, ParseError> {
        let parsed = AbsoluteUri::parse(uri).map_err(|e| {
            let kind = match e.kind() {
                SyntaxErrorKind::NoScheme => ParseErrorKind::InvalidScheme,
                SyntaxErrorKind::NegativePort => ParseErrorKind::InvalidPort,
                _ => ParseErrorKind::InvalidUri,
            };
            ParseError::from_syntax(kind, e)
        })?;
        let scheme = HttpScheme::from_scheme(parsed.scheme()).ok_or_else(|| {
            ParseError::with_message(ParseErrorKind::UnsupportedScheme, parsed.scheme())
        })?;
        if parsed.path().starts_with("//") {
            return Err(ParseError::with_message(
                ParseErrorKind::InvalidPath,
                format!("the path of {} starts with //", parsed.as_str()),
            ));
        }
        if !parsed.has_authority() {
            return Err(ParseError::with_message(
                ParseErrorKind::InvalidUri,
                "the authority is missing",
            ));
        }
        let host = parsed.host().unwrap_or_default().to_ascii_lowercase();
        if host.is_empty() {
            return Err(ParseError::with_message(
                ParseErrorKind::InvalidUri,
                "the host is empty",
            ));
        }
        let port = match parsed.port() {
            Some(port) if !port.is_empty() => port.parse::<u16>().map_err(ParseError::from_port)?,
            _ => scheme.default_port(),
        };
        let (user, password) = match parsed.userinfo() {
            Some(userinfo) => {
                let userinfo = percent_decode_str(userinfo).decode_utf8_lossy();
                match userinfo.split_once(':') {
                    Some((user, password)) => (user.to_owned(), password.to_owned()),
                    None => (userinfo.into_owned(), String::new()),
                }
            }
            None => (String::new(), String::new()),
        };
        let path = match parsed.path() {
            "" => "/".to_owned(),
            path => path.to_owned(),
        };
        Ok(Self {
            scheme,
            user,
            password,
            host,
            port,
            path,
            query: parsed.query().map(Query::parse).unwrap_or_default(),
            fragment: parsed.fragment().unwrap_or_default().to_owned(),
        })
    }

    /// `http` or `https`.
    #[inline]
    pub fn scheme(&self) -> &'static str {
        self.scheme.as_str()
    }

    #[inline]
    pub fn http_scheme(&self) -> HttpScheme {
        self.scheme
    }

    /// The percent-decoded user name, empty if there is none.
    #[inline]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The percent-decoded password, empty if there is none.
    #[inline]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// The lowercase host. IPv6 addresses keep their brackets.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The explicit port or the default one of the scheme.
    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// The path without dot segments. Never empty.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// The fragment without the leading `#`, empty if there is none.
    #[inline]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

impl FromStr for HttpParts {
    type Err = ParseError;

    #[inline]
    fn from_str(uri: &str) -> Result<Self, ParseError> {
        Self::parse(uri)
    }
}

/// Returns `uri` with an explicit `http://` or `https://` prefix.
fn with_scheme(uri: &str) -> Result<Cow<'_, str>, ParseError> {
    if starts_with_ignore_ascii_case(uri, "http://") || starts_with_ignore_ascii_case(uri, "https://")
    {
        return Ok(uri.into());
    }
    if let Some((scheme, _)) = uri.split_once("://") {
        if !scheme.contains(['/', '?', '#', '@', ':', '[', ']']) {
            let kind = if is_valid_scheme(scheme) {
                ParseErrorKind::UnsupportedScheme
            } else {
                ParseErrorKind::InvalidScheme
            };
            return Err(ParseError::with_message(kind, scheme));
        }
    }
    let prefix = if targets_https_port(uri) {
        "https://"
    } else {
        "http://"
    };
    tracing::trace!(uri, prefix, "inferred missing scheme");
    Ok(format!("{prefix}{uri}").into())
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Whether `:443` appears without being followed by a word character or `@`.
fn targets_https_port(uri: &str) -> bool {
    uri.match_indices(":443").any(|(i, m)| {
        !uri[i + m.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '@')
    })
}

fn starts_with_ignore_ascii_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
