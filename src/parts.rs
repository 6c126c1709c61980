use crate::data::DataParts;
use crate::http::HttpParts;
use crate::ParseError;
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::str::FromStr;

/// The grammar used to parse a URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SchemeFamily {
    /// `http://` and `https://` URIs, the scheme might be omitted.
    #[default]
    Http,
    /// [RFC 2397](https://www.ietf.org/rfc/rfc2397) `data:` URIs.
    Data,
}

impl SchemeFamily {
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Data => "data",
        }
    }
}

impl fmt::Display for SchemeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemeFamily {
    type Err = UnknownSchemeFamily;

    fn from_str(s: &str) -> Result<Self, UnknownSchemeFamily> {
        if s.eq_ignore_ascii_case("http") {
            Ok(Self::Http)
        } else if s.eq_ignore_ascii_case("data") {
            Ok(Self::Data)
        } else {
            Err(UnknownSchemeFamily(s.to_owned()))
        }
    }
}

/// Raised when converting a string that is neither `http` nor `data` into a [`SchemeFamily`].
#[derive(Debug, Clone)]
pub struct UnknownSchemeFamily(String);

impl fmt::Display for UnknownSchemeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown scheme family '{}', expecting http or data", self.0)
    }
}

impl std::error::Error for UnknownSchemeFamily {}

/// The parts of a URI, as returned by [`parse_uri`](crate::parse_uri).
///
/// ```
/// use urikit::{parse_uri, SchemeFamily, UriParts};
///
/// let parts = parse_uri("data:,Hello", SchemeFamily::Data).unwrap();
/// assert_eq!(parts.scheme(), "data");
/// assert!(matches!(parts, UriParts::Data(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize))]
pub enum UriParts {
    Http(HttpParts),
    Data(DataParts),
}

impl UriParts {
    /// Parses `uri` with the grammar of `family`.
    pub fn parse(uri: &str, family: SchemeFamily) -> Result<Self, ParseError> {
        tracing::trace!(%family, "extracting URI parts");
        match family {
            SchemeFamily::Http => HttpParts::parse(uri).map(Self::Http),
            SchemeFamily::Data => DataParts::parse(uri).map(Self::Data),
        }
    }

    /// The lowercase scheme: `http`, `https` or `data`.
    #[inline]
    pub fn scheme(&self) -> &str {
        match self {
            Self::Http(parts) => parts.scheme(),
            Self::Data(parts) => parts.scheme(),
        }
    }

    #[inline]
    pub fn family(&self) -> SchemeFamily {
        match self {
            Self::Http(_) => SchemeFamily::Http,
            Self::Data(_) => SchemeFamily::Data,
        }
    }

    #[inline]
    pub fn as_http(&self) -> Option<&HttpParts> {
        if let Self::Http(parts) = self {
            Some(parts)
        } else {
            None
        }
    }

    #[inline]
    pub fn as_data(&self) -> Option<&DataParts> {
        if let Self::Data(parts) = self {
            Some(parts)
        } else {
            None
        }
    }
}

impl From<HttpParts> for UriParts {
    #[inline]
    fn from(parts: HttpParts) -> Self {
        Self::Http(parts)
    }
}

impl From<DataParts> for UriParts {
    #[inline]
    fn from(parts: DataParts) -> Self {
        Self::Data(parts)
    }
}

/// The decoded key-value pairs of a query string.
///
/// Looking up a key returns the value of its last occurrence but every pair stays available.
/// Two queries are equal if they map the same keys to the same values, whatever the pair order.
///
/// ```
/// use urikit::HttpParts;
///
/// let parts = HttpParts::parse("http://example.com/?a=1&b=x+y&a=2").unwrap();
/// let query = parts.query();
/// assert_eq!(query.get("a"), Some("2"));
/// assert_eq!(query.get("b"), Some("x y"));
/// assert_eq!(query.get_all("a").collect::<Vec<_>>(), ["1", "2"]);
/// assert_eq!(query.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    pairs: Vec<(String, String)>,
    last_values: BTreeMap<String, usize>,
}

impl Query {
    /// Decodes a form-encoded query string (`+` and `%20` both stand for a space).
    pub(crate) fn parse(query: &str) -> Self {
        form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// The value of the last pair with this key.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.last_values
            .get(key)
            .map(|i| self.pairs[*i].1.as_str())
    }

    /// The values of all the pairs with this key, in order of appearance.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.last_values.contains_key(key)
    }

    /// The distinct keys, sorted.
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.last_values.keys().map(String::as_str)
    }

    /// The distinct keys with their last value, sorted by key.
    #[inline]
    pub fn iter(&self) -> QueryIter<'_> {
        QueryIter {
            query: self,
            inner: self.last_values.iter(),
        }
    }

    /// Every pair in order of appearance, duplicated keys included.
    #[inline]
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The number of distinct keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.last_values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Collects the distinct keys with their last value.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }
}

impl PartialEq for Query {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for Query {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut query = Self::default();
        for (key, value) in iter {
            let key = key.into();
            query.last_values.insert(key.clone(), query.pairs.len());
            query.pairs.push((key, value.into()));
        }
        query
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = (&'a str, &'a str);
    type IntoIter = QueryIter<'a>;

    #[inline]
    fn into_iter(self) -> QueryIter<'a> {
        self.iter()
    }
}

/// Iterator on the distinct keys of a [`Query`] with their last value.
pub struct QueryIter<'a> {
    query: &'a Query,
    inner: btree_map::Iter<'a, String, usize>,
}

impl<'a> Iterator for QueryIter<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<(&'a str, &'a str)> {
        let (key, i) = self.inner.next()?;
        Some((key.as_str(), self.query.pairs[*i].1.as_str()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Query {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[cfg(feature = "borsh")]
impl borsh::BorshSerialize for Query {
    fn serialize<W: borsh::io::Write>(&self, writer: &mut W) -> borsh::io::Result<()> {
        borsh::BorshSerialize::serialize(&self.to_map(), writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_last_value_wins() {
        let query = Query::parse("a=1&b=2&a=3");
        assert_eq!(query.get("a"), Some("3"));
        assert_eq!(query.get("b"), Some("2"));
        assert_eq!(query.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(
            query.pairs().collect::<Vec<_>>(),
            [("a", "1"), ("b", "2"), ("a", "3")]
        );
    }

    #[test]
    fn test_query_decoding() {
        let query = Query::parse("name=obi+wan&status=%C3%A9t%C3%A9%20x&flag&=empty");
        assert_eq!(query.get("name"), Some("obi wan"));
        assert_eq!(query.get("status"), Some("été x"));
        assert_eq!(query.get("flag"), Some(""));
        assert_eq!(query.get(""), Some("empty"));
    }

    #[test]
    fn test_empty_query() {
        assert!(Query::parse("").is_empty());
        assert_eq!(Query::parse(""), Query::default());
    }

    #[test]
    fn test_query_eq_ignores_order() {
        assert_eq!(Query::parse("a=1&b=2"), Query::parse("b=2&a=1"));
        assert_eq!(Query::parse("a=0&a=1"), Query::parse("a=1"));
        assert_ne!(Query::parse("a=1"), Query::parse("a=1&b=2"));
    }

    #[test]
    fn test_scheme_family_from_str() {
        assert_eq!("HTTP".parse::<SchemeFamily>().unwrap(), SchemeFamily::Http);
        assert_eq!("data".parse::<SchemeFamily>().unwrap(), SchemeFamily::Data);
        assert!("ftp".parse::<SchemeFamily>().is_err());
        assert_eq!(SchemeFamily::default(), SchemeFamily::Http);
    }
}
