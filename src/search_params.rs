// Copyright 2025 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `URLSearchParams` companion: an ordered multimap of string pairs.
//!
//! A standalone [`UrlSearchParams`] is a plain list. The one owned by a
//! [`Url`] is bound to that URL's query string: mutations must go through
//! the [`SearchParamsMut`] handle returned by [`Url::search_params_mut`],
//! which runs the update step after each of them, so the URL's `search`
//! reflects the list immediately on the next read.

use std::fmt;
use std::iter::FromIterator;
use std::ops::Deref;
use std::slice;

use crate::form_urlencoded;
use crate::Url;

/// An ordered list of name/value pairs, as parsed from an
/// `application/x-www-form-urlencoded` string.
///
/// Insertion order is preserved and duplicate names are allowed; only
/// [`sort`](UrlSearchParams::sort) reorders the list.
///
/// ```
/// use weburl::UrlSearchParams;
///
/// let mut params = UrlSearchParams::parse("?a=1&b=2&a=3");
/// assert_eq!(params.get("a"), Some("1"));
/// assert_eq!(params.get_all("a"), ["1", "3"]);
/// params.set("a", "9");
/// assert_eq!(params.to_string(), "a=9&b=2");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UrlSearchParams {
    pub(crate) list: Vec<(String, String)>,
}

impl UrlSearchParams {
    /// Create an empty list.
    #[inline]
    pub fn new() -> UrlSearchParams {
        UrlSearchParams::default()
    }

    /// Parse an `application/x-www-form-urlencoded` string; an optional
    /// leading `?` is stripped first.
    pub fn parse(input: &str) -> UrlSearchParams {
        let input = input.strip_prefix('?').unwrap_or(input);
        UrlSearchParams {
            list: form_urlencoded::parse(input),
        }
    }

    /// Build a list from a sequence of sequences, the way the
    /// `URLSearchParams` constructor accepts `[["a", "1"], ["b", "2"]]`.
    ///
    /// Fails with [`InvalidPairLength`] unless every inner sequence holds
    /// exactly a name and a value.
    pub fn from_sequences<I, P, S>(sequences: I) -> Result<UrlSearchParams, InvalidPairLength>
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Vec::new();
        for pair in sequences {
            let mut items = pair.into_iter();
            match (items.next(), items.next(), items.next()) {
                (Some(name), Some(value), None) => list.push((name.into(), value.into())),
                _ => return Err(InvalidPairLength),
            }
        }
        Ok(UrlSearchParams { list })
    }

    /// The value of the first pair whose name is `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.list
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The values of all pairs whose name is `name`, in order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.list
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Whether there is at least one pair whose name is `name`.
    pub fn has(&self, name: &str) -> bool {
        self.list.iter().any(|(n, _)| n == name)
    }

    /// Number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Append a new pair at the end.
    pub fn append(&mut self, name: &str, value: &str) {
        self.list.push((name.to_string(), value.to_string()));
    }

    /// Remove every pair whose name is `name`.
    pub fn delete(&mut self, name: &str) {
        self.list.retain(|(n, _)| n != name);
    }

    /// Set `name` to a single value: the first matching pair's value is
    /// overwritten and the remaining matches removed, keeping the first
    /// pair's position; a name not in the list is appended.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.list.iter().position(|(n, _)| n == name) {
            Some(first) => {
                self.list[first].1 = value.to_string();
                let mut index = 0;
                self.list.retain(|(n, _)| {
                    let keep = index <= first || n != name;
                    index += 1;
                    keep
                });
            }
            None => self.list.push((name.to_string(), value.to_string())),
        }
    }

    /// Stable sort by UTF-16 code-unit order of the names. Values are
    /// untouched and pairs with equal names keep their relative order.
    pub fn sort(&mut self) {
        self.list
            .sort_by(|a, b| a.0.encode_utf16().cmp(b.0.encode_utf16()));
    }

    /// Iterate over `(name, value)` pairs in list order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.list.iter(),
        }
    }

    /// Iterate over the names, in list order, duplicates included.
    #[inline]
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            inner: self.list.iter(),
        }
    }

    /// Iterate over the values, in list order.
    #[inline]
    pub fn values(&self) -> Values<'_> {
        Values {
            inner: self.list.iter(),
        }
    }
}

/// Serializes in the `application/x-www-form-urlencoded` syntax.
impl fmt::Display for UrlSearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&form_urlencoded::serialize(&self.list))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for UrlSearchParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> UrlSearchParams {
        UrlSearchParams {
            list: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Error returned by [`UrlSearchParams::from_sequences`] when an inner
/// sequence does not hold exactly two items.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct InvalidPairLength;

impl fmt::Display for InvalidPairLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("each pair must hold exactly a name and a value")
    }
}

impl std::error::Error for InvalidPairLength {}

/// Write access to the parameter list bound to a [`Url`].
///
/// Dereferences to [`UrlSearchParams`] for reads. Every mutation runs the
/// update step: the list is re-serialized into the URL's query, which
/// becomes `None` when the list is empty.
///
/// ```
/// use weburl::Url;
///
/// let mut url = Url::parse("http://example.com/?b=2&a=1")?;
/// url.search_params_mut().sort();
/// assert_eq!(url.search(), "?a=1&b=2");
/// # Ok::<(), weburl::ParseError>(())
/// ```
pub struct SearchParamsMut<'a> {
    url: &'a mut Url,
}

impl<'a> SearchParamsMut<'a> {
    pub(crate) fn new(url: &'a mut Url) -> SearchParamsMut<'a> {
        SearchParamsMut { url }
    }

    /// As [`UrlSearchParams::append`], then update the query.
    pub fn append(&mut self, name: &str, value: &str) {
        self.url.params.append(name, value);
        self.update();
    }

    /// As [`UrlSearchParams::delete`], then update the query.
    pub fn delete(&mut self, name: &str) {
        self.url.params.delete(name);
        self.update();
    }

    /// As [`UrlSearchParams::set`], then update the query.
    pub fn set(&mut self, name: &str, value: &str) {
        self.url.params.set(name, value);
        self.update();
    }

    /// As [`UrlSearchParams::sort`], then update the query.
    pub fn sort(&mut self) {
        self.url.params.sort();
        self.update();
    }

    fn update(&mut self) {
        let serialized = self.url.params.to_string();
        self.url.query = if serialized.is_empty() {
            None
        } else {
            Some(serialized)
        };
    }
}

impl Deref for SearchParamsMut<'_> {
    type Target = UrlSearchParams;

    #[inline]
    fn deref(&self) -> &UrlSearchParams {
        &self.url.params
    }
}

/// Iterator over the `(name, value)` pairs of a [`UrlSearchParams`].
#[derive(Clone)]
pub struct Iter<'a> {
    inner: slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// Iterator over the names of a [`UrlSearchParams`].
#[derive(Clone)]
pub struct Keys<'a> {
    inner: slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(n, _)| n.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Keys<'_> {}

/// Iterator over the values of a [`UrlSearchParams`].
#[derive(Clone)]
pub struct Values<'a> {
    inner: slice::Iter<'a, (String, String)>,
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Values<'_> {}

impl<'a> IntoIterator for &'a UrlSearchParams {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
