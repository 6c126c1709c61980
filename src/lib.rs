//! Utilities to percent-encode, Base64-encode and extract the parts of `http(s)` and
//! [RFC 2397](https://www.ietf.org/rfc/rfc2397) `data:` URIs.
//!
//! ```
//! use urikit::{parse_uri, SchemeFamily, UriParts};
//!
//! // Extract the parts of an HTTP URI, the scheme is optional
//! let parts = parse_uri("www.example.com/search?q=rust+uri#top", SchemeFamily::Http).unwrap();
//! let UriParts::Http(http) = parts else { unreachable!() };
//! assert_eq!(http.scheme(), "http");
//! assert_eq!(http.host(), "www.example.com");
//! assert_eq!(http.port(), 80);
//! assert_eq!(http.path(), "/search");
//! assert_eq!(http.query().get("q"), Some("rust uri"));
//! assert_eq!(http.fragment(), "top");
//!
//! // Extract the parts of a data URI
//! let parts = parse_uri("data:text/plain;charset=UTF-8;base64,bW9pbg==", SchemeFamily::Data).unwrap();
//! let UriParts::Data(data) = parts else { unreachable!() };
//! assert_eq!(data.mime_type(), "text/plain");
//! assert!(data.base64());
//! assert_eq!(data.decode_text().unwrap(), "moin");
//! ```
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]

mod charset;
mod codec;
mod data;
mod error;
mod http;
mod parser;
mod parts;

pub use charset::Charset;
pub use codec::{
    decode_base64, decode_base64_bytes, decode_url, encode_base64, encode_url, Base64Input,
};
pub use data::DataParts;
pub use error::{CodecError, CodecErrorKind, ParseError, ParseErrorKind};
pub use http::{HttpParts, HttpScheme};
pub use parts::{Query, QueryIter, SchemeFamily, UnknownSchemeFamily, UriParts};

/// Extracts the parts of `uri` following the grammar of `family`.
///
/// ```
/// use urikit::{parse_uri, ParseErrorKind, SchemeFamily};
///
/// let parts = parse_uri("http://www.example.com", SchemeFamily::Http).unwrap();
/// assert_eq!(parts.scheme(), "http");
///
/// let error = parse_uri("data:text/plain;foo,bar", SchemeFamily::Data).unwrap_err();
/// assert_eq!(error.kind(), ParseErrorKind::InvalidParameter);
/// ```
#[inline]
pub fn parse_uri(uri: &str, family: SchemeFamily) -> Result<UriParts, ParseError> {
    UriParts::parse(uri, family)
}
