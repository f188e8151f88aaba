// Copyright 2025 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/*!

weburl implements the mutable URL object of the WHATWG
[URL Standard](https://url.spec.whatwg.org/) on top of the basic URL
parser: a [`Url`] is a parsed record whose attributes can be read and
individually assigned, with every assignment re-validated by the same
state machine that parsed the URL in the first place.

A [`UrlSearchParams`] list is kept alongside every URL and stays
bidirectionally in sync with its query string: edits through
[`Url::search_params_mut`] are written back into the query, and assigning
[`Url::set_search`] or [`Url::set_href`] re-derives the list.

# Parsing

```
use weburl::Url;

let url = Url::parse("https://example.com/feed?tag=rust#latest")?;
assert_eq!(url.host(), "example.com");
assert_eq!(url.pathname(), "/feed");
assert_eq!(url.search(), "?tag=rust");
# Ok::<(), weburl::ParseError>(())
```

A relative reference needs a base URL:

```
use weburl::Url;

let base = Url::parse("https://example.com/a/b/c")?;
let url = base.join("../d")?;
assert_eq!(url.href(), "https://example.com/a/d");
# Ok::<(), weburl::ParseError>(())
```

# Mutation

```
use weburl::Url;

let mut url = Url::parse("http://example.com/?q=rust")?;
url.set_pathname("/search")?;
url.search_params_mut().append("page", "2");
assert_eq!(url.href(), "http://example.com/search?q=rust&page=2");
# Ok::<(), weburl::ParseError>(())
```

*/

pub use crate::host::{Host, Ipv6Address};
pub use crate::parser::{ParseError, ParseResult, SyntaxViolation};
pub use crate::search_params::{
    InvalidPairLength, Iter, Keys, SearchParamsMut, UrlSearchParams, Values,
};

pub mod form_urlencoded;
mod host;
mod origin;
mod parser;
pub mod percent_encoding;
mod search_params;

use std::fmt;
use std::hash;
use std::str::FromStr;

use crate::parser::{Parser, State};
use crate::percent_encoding::{utf8_percent_encode_to, DEFAULT_ENCODE_SET};

/// A parsed URL record, together with its bound search-parameter list.
#[derive(Clone, Debug)]
pub struct Url {
    pub(crate) scheme: String,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) host: Option<Host>,
    pub(crate) port: Option<u16>,
    pub(crate) path: Vec<String>,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
    pub(crate) cannot_be_a_base: bool,
    pub(crate) params: UrlSearchParams,
}

/// Full configuration for the URL parser: [`Url::parse`] and [`Url::join`]
/// are convenience wrappers for this.
#[derive(Copy, Clone)]
pub struct ParseOptions<'a> {
    base_url: Option<&'a Url>,
    violation_fn: Option<&'a dyn Fn(SyntaxViolation)>,
}

impl<'a> ParseOptions<'a> {
    /// Change the base URL.
    pub fn base_url(mut self, new: Option<&'a Url>) -> Self {
        self.base_url = new;
        self
    }

    /// Call the provided function on each non-fatal syntax violation the
    /// parser runs into.
    pub fn syntax_violation_callback(mut self, new: Option<&'a dyn Fn(SyntaxViolation)>) -> Self {
        self.violation_fn = new;
        self
    }

    /// Parse a URL string with the configuration so far.
    pub fn parse(self, input: &str) -> Result<Url, ParseError> {
        let mut url = Parser {
            base_url: self.base_url,
            violation_fn: self.violation_fn,
        }
        .parse_url(input)?;
        url.sync_search_params();
        Ok(url)
    }
}

impl Url {
    /// Parse an absolute URL from a string.
    ///
    /// ```
    /// use weburl::Url;
    ///
    /// let url = Url::parse("http://example.com/a/b")?;
    /// assert_eq!(url.pathname(), "/a/b");
    /// # Ok::<(), weburl::ParseError>(())
    /// ```
    #[inline]
    pub fn parse(input: &str) -> Result<Url, ParseError> {
        Url::options().parse(input)
    }

    /// Parse a string as a URL, with this URL as the base.
    ///
    /// The base's components are carried over the way a browser resolves a
    /// relative reference on a page.
    #[inline]
    pub fn join(&self, input: &str) -> Result<Url, ParseError> {
        Url::options().base_url(Some(self)).parse(input)
    }

    /// Return a default [`ParseOptions`] that can fully configure the
    /// parser.
    pub fn options<'a>() -> ParseOptions<'a> {
        ParseOptions {
            base_url: None,
            violation_fn: None,
        }
    }

    pub(crate) fn blank() -> Url {
        Url {
            scheme: String::new(),
            username: String::new(),
            password: String::new(),
            host: None,
            port: None,
            path: Vec::new(),
            query: None,
            fragment: None,
            cannot_be_a_base: false,
            params: UrlSearchParams::new(),
        }
    }

    // Getters.

    /// The complete serialization of this URL
    /// (<https://url.spec.whatwg.org/#dom-url-href>).
    #[inline]
    pub fn href(&self) -> String {
        self.to_string()
    }

    /// The scheme of this URL, lowercased, without the trailing `:`.
    #[inline]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Getter for the `protocol` attribute: the scheme followed by `:`
    /// (<https://url.spec.whatwg.org/#dom-url-protocol>).
    pub fn protocol(&self) -> String {
        format!("{}:", self.scheme)
    }

    /// Getter for <https://url.spec.whatwg.org/#dom-url-username>.
    #[inline]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Getter for <https://url.spec.whatwg.org/#dom-url-password>.
    #[inline]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Getter for the `host` attribute: the serialized host, with `:port`
    /// appended when the port is explicit
    /// (<https://url.spec.whatwg.org/#dom-url-host>).
    pub fn host(&self) -> String {
        match (&self.host, self.port) {
            (None, _) => String::new(),
            (Some(host), None) => host.to_string(),
            (Some(host), Some(port)) => format!("{}:{}", host, port),
        }
    }

    /// Getter for the `hostname` attribute: the serialized host without a
    /// port (<https://url.spec.whatwg.org/#dom-url-hostname>).
    pub fn hostname(&self) -> String {
        match &self.host {
            Some(host) => host.to_string(),
            None => String::new(),
        }
    }

    /// Getter for the `port` attribute: decimal digits, or the empty string
    /// when the port is the scheme's default or absent
    /// (<https://url.spec.whatwg.org/#dom-url-port>).
    pub fn port(&self) -> String {
        match self.port {
            Some(port) => port.to_string(),
            None => String::new(),
        }
    }

    /// Getter for the `pathname` attribute
    /// (<https://url.spec.whatwg.org/#dom-url-pathname>).
    pub fn pathname(&self) -> String {
        let mut output = String::new();
        if self.cannot_be_a_base {
            if let Some(first) = self.path.first() {
                output.push_str(first);
            }
        } else {
            for segment in &self.path {
                output.push('/');
                output.push_str(segment);
            }
        }
        output
    }

    /// Getter for the `search` attribute: `?` followed by the query, or the
    /// empty string when the query is absent or empty
    /// (<https://url.spec.whatwg.org/#dom-url-search>).
    pub fn search(&self) -> String {
        match &self.query {
            Some(query) if !query.is_empty() => format!("?{}", query),
            _ => String::new(),
        }
    }

    /// Getter for the `hash` attribute: `#` followed by the fragment, or
    /// the empty string (<https://url.spec.whatwg.org/#dom-url-hash>).
    pub fn hash(&self) -> String {
        match &self.fragment {
            Some(fragment) if !fragment.is_empty() => format!("#{}", fragment),
            _ => String::new(),
        }
    }

    /// The raw query string, without the leading `?`.
    #[inline]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// The raw fragment identifier, without the leading `#`.
    #[inline]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Whether this URL's path is a single opaque string, as in
    /// `mailto:someone@example.com`. Most setters are inhibited on such a
    /// URL.
    #[inline]
    pub fn cannot_be_a_base(&self) -> bool {
        self.cannot_be_a_base
    }

    /// Shared view of the bound search-parameter list.
    #[inline]
    pub fn search_params(&self) -> &UrlSearchParams {
        &self.params
    }

    /// Mutable access to the bound search-parameter list. Every mutation
    /// made through the returned handle is written back into this URL's
    /// query string.
    #[inline]
    pub fn search_params_mut(&mut self) -> SearchParamsMut<'_> {
        SearchParamsMut::new(self)
    }

    // Setters. Each one re-enters the basic URL parser with a state
    // override, so the new value is validated and canonicalized exactly
    // like it would be in a full parse. A setter whose precondition fails
    // (for example assigning a username to a URL without a host) is a
    // no-op, per the standard; a value the parser rejects returns `Err`
    // and leaves the record unchanged.

    /// Setter for <https://url.spec.whatwg.org/#dom-url-href>: reparse from
    /// scratch.
    pub fn set_href(&mut self, input: &str) -> Result<(), ParseError> {
        *self = Url::parse(input)?;
        Ok(())
    }

    /// Setter for <https://url.spec.whatwg.org/#dom-url-protocol>.
    ///
    /// Changing between a special and a non-special scheme is a no-op.
    pub fn set_protocol(&mut self, input: &str) -> Result<(), ParseError> {
        let input = format!("{}:", input);
        Parser {
            base_url: None,
            violation_fn: None,
        }
        .parse_with_override(&input, self, State::SchemeStart)
    }

    /// Setter for <https://url.spec.whatwg.org/#dom-url-username>.
    pub fn set_username(&mut self, input: &str) -> Result<(), ParseError> {
        if self.cannot_have_credentials() {
            return Ok(());
        }
        self.username.clear();
        utf8_percent_encode_to(input, DEFAULT_ENCODE_SET, &mut self.username);
        Ok(())
    }

    /// Setter for <https://url.spec.whatwg.org/#dom-url-password>.
    pub fn set_password(&mut self, input: &str) -> Result<(), ParseError> {
        if self.cannot_have_credentials() {
            return Ok(());
        }
        self.password.clear();
        utf8_percent_encode_to(input, DEFAULT_ENCODE_SET, &mut self.password);
        Ok(())
    }

    /// Setter for <https://url.spec.whatwg.org/#dom-url-host>: host and
    /// optional port.
    pub fn set_host(&mut self, input: &str) -> Result<(), ParseError> {
        if self.cannot_be_a_base {
            return Ok(());
        }
        Parser {
            base_url: None,
            violation_fn: None,
        }
        .parse_with_override(input, self, State::Host)
    }

    /// Setter for <https://url.spec.whatwg.org/#dom-url-hostname>: host
    /// only, a `:` and anything after it is rejected.
    pub fn set_hostname(&mut self, input: &str) -> Result<(), ParseError> {
        if self.cannot_be_a_base {
            return Ok(());
        }
        Parser {
            base_url: None,
            violation_fn: None,
        }
        .parse_with_override(input, self, State::Hostname)
    }

    /// Setter for <https://url.spec.whatwg.org/#dom-url-port>; the empty
    /// string clears the port.
    pub fn set_port(&mut self, input: &str) -> Result<(), ParseError> {
        if self.cannot_have_credentials() {
            return Ok(());
        }
        if input.is_empty() {
            self.port = None;
            return Ok(());
        }
        Parser {
            base_url: None,
            violation_fn: None,
        }
        .parse_with_override(input, self, State::Port)
    }

    /// Setter for <https://url.spec.whatwg.org/#dom-url-pathname>.
    pub fn set_pathname(&mut self, input: &str) -> Result<(), ParseError> {
        if self.cannot_be_a_base {
            return Ok(());
        }
        self.path.clear();
        Parser {
            base_url: None,
            violation_fn: None,
        }
        .parse_with_override(input, self, State::PathStart)
    }

    /// Setter for <https://url.spec.whatwg.org/#dom-url-search>. An
    /// optional leading `?` is stripped; the empty string clears the query
    /// and empties the bound parameter list.
    pub fn set_search(&mut self, input: &str) -> Result<(), ParseError> {
        if input.is_empty() {
            self.query = None;
            self.params.list.clear();
            return Ok(());
        }
        let input = input.strip_prefix('?').unwrap_or(input);
        self.query = Some(String::new());
        let result = Parser {
            base_url: None,
            violation_fn: None,
        }
        .parse_with_override(input, self, State::Query);
        self.sync_search_params();
        result
    }

    /// Setter for <https://url.spec.whatwg.org/#dom-url-hash>. An optional
    /// leading `#` is stripped; the empty string clears the fragment.
    pub fn set_hash(&mut self, input: &str) -> Result<(), ParseError> {
        if input.is_empty() {
            self.fragment = None;
            return Ok(());
        }
        let input = input.strip_prefix('#').unwrap_or(input);
        self.fragment = Some(String::new());
        Parser {
            base_url: None,
            violation_fn: None,
        }
        .parse_with_override(input, self, State::Fragment)
    }

    pub(crate) fn has_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }

    fn cannot_have_credentials(&self) -> bool {
        self.host.is_none() || self.cannot_be_a_base || self.scheme == "file"
    }

    /// Re-derive the bound parameter list from the query string.
    pub(crate) fn sync_search_params(&mut self) {
        self.params.list = match &self.query {
            Some(query) => form_urlencoded::parse(query),
            None => Vec::new(),
        };
    }

    /// The URL serializer.
    fn write_to<W: fmt::Write>(&self, w: &mut W, exclude_fragment: bool) -> fmt::Result {
        w.write_str(&self.scheme)?;
        w.write_str(":")?;
        if let Some(host) = &self.host {
            w.write_str("//")?;
            if self.has_credentials() {
                w.write_str(&self.username)?;
                if !self.password.is_empty() {
                    write!(w, ":{}", self.password)?;
                }
                w.write_str("@")?;
            }
            write!(w, "{}", host)?;
            if let Some(port) = self.port {
                write!(w, ":{}", port)?;
            }
        } else if self.scheme == "file" {
            w.write_str("//")?;
        }
        if self.cannot_be_a_base {
            if let Some(first) = self.path.first() {
                w.write_str(first)?;
            }
        } else {
            for segment in &self.path {
                w.write_str("/")?;
                w.write_str(segment)?;
            }
        }
        if let Some(query) = &self.query {
            write!(w, "?{}", query)?;
        }
        if !exclude_fragment {
            if let Some(fragment) = &self.fragment {
                write!(w, "#{}", fragment)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Url {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, false)
    }
}

impl FromStr for Url {
    type Err = ParseError;

    #[inline]
    fn from_str(input: &str) -> Result<Url, ParseError> {
        Url::parse(input)
    }
}

/// URLs compare field-by-field on the parsed record; the derived parameter
/// list is not part of a URL's identity.
impl PartialEq for Url {
    fn eq(&self, other: &Url) -> bool {
        self.scheme == other.scheme
            && self.username == other.username
            && self.password == other.password
            && self.host == other.host
            && self.port == other.port
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
            && self.cannot_be_a_base == other.cannot_be_a_base
    }
}

impl Eq for Url {}

impl hash::Hash for Url {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.scheme.hash(state);
        self.username.hash(state);
        self.password.hash(state);
        self.host.hash(state);
        self.port.hash(state);
        self.path.hash(state);
        self.query.hash(state);
        self.fragment.hash(state);
        self.cannot_be_a_base.hash(state);
    }
}

/// Serializes as the `href` string, which doubles as the JSON form.
#[cfg(feature = "serde")]
impl serde::Serialize for Url {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Url, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        let s = String::deserialize(deserializer)?;
        Url::parse(&s).map_err(Error::custom)
    }
}
