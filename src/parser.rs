// Copyright 2025 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The basic URL parser.
//!
//! A single-cursor state machine over the input's code points. A fresh
//! parse starts in the scheme-start state and builds a new record; an
//! attribute setter re-enters the machine with a *state override*, mutating
//! one slice of an already-parsed record in place. The override also
//! changes a number of edge-case exits, so that for example a port setter
//! terminates once the port digits run out instead of continuing into the
//! path.

use std::fmt::{self, Formatter};
use std::mem;

use crate::host::Host;
use crate::percent_encoding::{
    utf8_percent_encode_to, AsciiSet, DEFAULT_ENCODE_SET, QUERY_ENCODE_SET,
};
use crate::Url;

pub type ParseResult<T> = Result<T, ParseError>;

macro_rules! simple_enum_error {
    ($($name: ident => $description: expr,)+) => {
        /// Errors that can occur during parsing.
        ///
        /// This may be extended in the future so exhaustive matching is
        /// discouraged.
        #[derive(PartialEq, Eq, Clone, Copy, Debug)]
        pub enum ParseError {
            $($name,)+
        }

        impl fmt::Display for ParseError {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                match *self {
                    $(ParseError::$name => f.write_str($description),)+
                }
            }
        }
    }
}

simple_enum_error! {
    EmptyHost => "empty host",
    IdnaError => "invalid international domain name",
    InvalidScheme => "invalid scheme",
    InvalidPort => "invalid port number",
    InvalidIpv6Address => "invalid IPv6 address",
    InvalidDomainCharacter => "invalid domain character",
    RelativeUrlWithoutBase => "relative URL without a base",
    RelativeUrlWithCannotBeABaseBase => "relative URL with a cannot-be-a-base base",
}

impl std::error::Error for ParseError {}

macro_rules! syntax_violation_enum {
    ($($name: ident => $description: expr,)+) => {
        /// Non-fatal syntax violations.
        ///
        /// The parser still produces a URL when one of these is reported;
        /// they are delivered to the optional callback configured through
        /// [`ParseOptions::syntax_violation_callback`](crate::ParseOptions).
        #[derive(PartialEq, Eq, Clone, Copy, Debug)]
        pub enum SyntaxViolation {
            $($name,)+
        }

        impl SyntaxViolation {
            pub fn description(&self) -> &'static str {
                match *self {
                    $(SyntaxViolation::$name => $description,)+
                }
            }
        }

        impl fmt::Display for SyntaxViolation {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.description())
            }
        }
    }
}

syntax_violation_enum! {
    Backslash => "backslash",
    C0SpaceIgnored => "leading or trailing control or space character are ignored in URLs",
    EmbeddedCredentials =>
        "embedding authentication information (username or password) in an URL is not recommended",
    ExpectedDoubleSlash => "expected //",
    ExpectedFileDoubleSlash => "expected // after file:",
    FileLeadingEmptySegments => "leading empty path segments in a file URL are ignored",
    FileWithHostAndWindowsDrive => "file: with host and Windows drive letter",
    NonUrlCodePoint => "non-URL code point",
    NullInFragment => "NULL characters are ignored in URL fragment identifiers",
    PercentDecode => "expected 2 hex digits after %",
    TabOrNewlineIgnored => "tabs or newlines are ignored in URLs",
    UnexpectedDriveLetter => "unexpected Windows drive letter in a relative file URL",
}

/// The machine's states. A state override selects the initial state when a
/// single component of an existing record is re-parsed.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub(crate) enum State {
    SchemeStart,
    Scheme,
    NoScheme,
    SpecialRelativeOrAuthority,
    PathOrAuthority,
    Relative,
    RelativeSlash,
    SpecialAuthoritySlashes,
    SpecialAuthorityIgnoreSlashes,
    Authority,
    Host,
    Hostname,
    Port,
    File,
    FileSlash,
    FileHost,
    PathStart,
    Path,
    CannotBeABaseUrlPath,
    Query,
    Fragment,
}

/// Default port for each special scheme.
///
/// `gopher` is retained for bug-compatibility with the source this crate
/// follows, even though the living standard has dropped it; `file` maps to
/// port 0 for the same reason.
pub(crate) fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "ftp" => Some(21),
        "file" => Some(0),
        "gopher" => Some(70),
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        _ => None,
    }
}

/// A special scheme is exactly one with a known default port.
#[inline]
pub(crate) fn is_special_scheme(scheme: &str) -> bool {
    default_port(scheme).is_some()
}

pub(crate) struct Parser<'a> {
    pub base_url: Option<&'a Url>,
    pub violation_fn: Option<&'a dyn Fn(SyntaxViolation)>,
}

impl<'a> Parser<'a> {
    fn violation(&self, v: SyntaxViolation) {
        if let Some(f) = self.violation_fn {
            f(v)
        }
    }

    /// Parse `input` into a fresh record. Leading and trailing C0 controls
    /// and spaces are stripped, then all tabs and newlines, each with a
    /// violation.
    pub fn parse_url(self, input: &str) -> ParseResult<Url> {
        let mut url = Url::blank();
        let stripped = input.trim_matches(|c| c <= ' ');
        if stripped.len() != input.len() {
            self.violation(SyntaxViolation::C0SpaceIgnored);
        }
        let input = self.filter_tab_newline(stripped);
        self.run(&input, &mut url, None)?;
        Ok(url)
    }

    /// Re-parse one component of `url` in place, entering the machine at
    /// `state_override`. Only tabs and newlines are stripped here; setters
    /// do not trim.
    pub fn parse_with_override(
        self,
        input: &str,
        url: &mut Url,
        state_override: State,
    ) -> ParseResult<()> {
        let input = self.filter_tab_newline(input);
        self.run(&input, url, Some(state_override))
    }

    fn filter_tab_newline(&self, input: &str) -> Vec<char> {
        let mut chars = Vec::with_capacity(input.len());
        let mut removed = false;
        for c in input.chars() {
            if matches!(c, '\t' | '\n' | '\r') {
                removed = true
            } else {
                chars.push(c)
            }
        }
        if removed {
            self.violation(SyntaxViolation::TabOrNewlineIgnored);
        }
        chars
    }

    fn parse_host(&self, buffer: &str, scheme: &str) -> ParseResult<Host> {
        if is_special_scheme(scheme) {
            Host::parse(buffer)
        } else {
            Host::parse_opaque(buffer)
        }
    }

    fn check_url_code_point(&self, c: char, input: &[char], pointer: isize) {
        if c == '%' {
            let after = slice_from(input, pointer + 1);
            if !(after.len() >= 2 && after[0].is_ascii_hexdigit() && after[1].is_ascii_hexdigit())
            {
                self.violation(SyntaxViolation::PercentDecode)
            }
        } else if !is_url_code_point(c) {
            self.violation(SyntaxViolation::NonUrlCodePoint)
        }
    }

    /// The state machine itself.
    ///
    /// The cursor indexes code points; `None` is the EOF sentinel past the
    /// end. A state that needs to re-read the current code point in its
    /// successor decrements the cursor before the loop increments it back.
    fn run(&self, input: &[char], url: &mut Url, state_override: Option<State>) -> ParseResult<()> {
        let len = input.len() as isize;
        let mut state = state_override.unwrap_or(State::SchemeStart);
        let mut buffer = String::new();
        let mut at_sign_seen = false;
        let mut password_token_seen = false;
        let mut inside_brackets = false;
        let mut pointer: isize = 0;

        loop {
            let c = if pointer >= 0 && pointer < len {
                Some(input[pointer as usize])
            } else {
                None
            };
            match state {
                State::SchemeStart => match c {
                    Some(c) if c.is_ascii_alphabetic() => {
                        buffer.push(c.to_ascii_lowercase());
                        state = State::Scheme;
                    }
                    _ if state_override.is_none() => {
                        state = State::NoScheme;
                        pointer -= 1;
                    }
                    _ => return Err(ParseError::InvalidScheme),
                },

                State::Scheme => match c {
                    Some(c)
                        if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') =>
                    {
                        buffer.push(c.to_ascii_lowercase());
                    }
                    Some(':') => {
                        if state_override.is_some() {
                            if is_special_scheme(&url.scheme) != is_special_scheme(&buffer) {
                                return Ok(());
                            }
                            if buffer == "file"
                                && (url.has_credentials() || url.port.is_some())
                            {
                                return Ok(());
                            }
                            if url.scheme == "file"
                                && matches!(url.host, Some(Host::Empty) | None)
                            {
                                return Ok(());
                            }
                        }
                        url.scheme = mem::take(&mut buffer);
                        if state_override.is_some() {
                            if url.port == default_port(&url.scheme) {
                                url.port = None;
                            }
                            return Ok(());
                        }
                        if url.scheme == "file" {
                            if !has_prefix(input, pointer + 1, "//") {
                                self.violation(SyntaxViolation::ExpectedFileDoubleSlash);
                            }
                            state = State::File;
                        } else if is_special_scheme(&url.scheme) {
                            match self.base_url {
                                Some(base) if base.scheme == url.scheme => {
                                    state = State::SpecialRelativeOrAuthority
                                }
                                _ => state = State::SpecialAuthoritySlashes,
                            }
                        } else if has_prefix(input, pointer + 1, "/") {
                            state = State::PathOrAuthority;
                            pointer += 1;
                        } else {
                            url.cannot_be_a_base = true;
                            url.path.push(String::new());
                            state = State::CannotBeABaseUrlPath;
                        }
                    }
                    _ if state_override.is_none() => {
                        // Not a scheme after all; start over as a relative
                        // reference from the first code point.
                        buffer.clear();
                        state = State::NoScheme;
                        pointer = -1;
                    }
                    _ => return Err(ParseError::InvalidScheme),
                },

                State::NoScheme => match self.base_url {
                    None => return Err(ParseError::RelativeUrlWithoutBase),
                    Some(base) if base.cannot_be_a_base => {
                        if c == Some('#') {
                            url.scheme = base.scheme.clone();
                            url.path = base.path.clone();
                            url.query = base.query.clone();
                            url.fragment = Some(String::new());
                            url.cannot_be_a_base = true;
                            state = State::Fragment;
                        } else {
                            return Err(ParseError::RelativeUrlWithCannotBeABaseBase);
                        }
                    }
                    Some(base) => {
                        if base.scheme == "file" {
                            state = State::File;
                        } else {
                            state = State::Relative;
                        }
                        pointer -= 1;
                    }
                },

                State::SpecialRelativeOrAuthority => {
                    if c == Some('/') && has_prefix(input, pointer + 1, "/") {
                        state = State::SpecialAuthorityIgnoreSlashes;
                        pointer += 1;
                    } else {
                        self.violation(SyntaxViolation::ExpectedDoubleSlash);
                        state = State::Relative;
                        pointer -= 1;
                    }
                }

                State::PathOrAuthority => {
                    if c == Some('/') {
                        state = State::Authority;
                    } else {
                        state = State::Path;
                        pointer -= 1;
                    }
                }

                State::Relative => {
                    let base = match self.base_url {
                        Some(base) => base,
                        None => return Err(ParseError::RelativeUrlWithoutBase),
                    };
                    url.scheme = base.scheme.clone();
                    match c {
                        None => {
                            url.username = base.username.clone();
                            url.password = base.password.clone();
                            url.host = base.host.clone();
                            url.port = base.port;
                            url.path = base.path.clone();
                            url.query = base.query.clone();
                        }
                        Some('/') => state = State::RelativeSlash,
                        Some('?') => {
                            url.username = base.username.clone();
                            url.password = base.password.clone();
                            url.host = base.host.clone();
                            url.port = base.port;
                            url.path = base.path.clone();
                            url.query = Some(String::new());
                            state = State::Query;
                        }
                        Some('#') => {
                            url.username = base.username.clone();
                            url.password = base.password.clone();
                            url.host = base.host.clone();
                            url.port = base.port;
                            url.path = base.path.clone();
                            url.query = base.query.clone();
                            url.fragment = Some(String::new());
                            state = State::Fragment;
                        }
                        Some(c) => {
                            if c == '\\' && is_special_scheme(&url.scheme) {
                                self.violation(SyntaxViolation::Backslash);
                                state = State::RelativeSlash;
                            } else {
                                url.username = base.username.clone();
                                url.password = base.password.clone();
                                url.host = base.host.clone();
                                url.port = base.port;
                                url.path = base.path.clone();
                                url.path.pop();
                                state = State::Path;
                                pointer -= 1;
                            }
                        }
                    }
                }

                State::RelativeSlash => {
                    let base = match self.base_url {
                        Some(base) => base,
                        None => return Err(ParseError::RelativeUrlWithoutBase),
                    };
                    match c {
                        Some('/') | Some('\\') if is_special_scheme(&url.scheme) => {
                            if c == Some('\\') {
                                self.violation(SyntaxViolation::Backslash);
                            }
                            state = State::SpecialAuthorityIgnoreSlashes;
                        }
                        Some('/') => state = State::Authority,
                        _ => {
                            url.username = base.username.clone();
                            url.password = base.password.clone();
                            url.host = base.host.clone();
                            url.port = base.port;
                            state = State::Path;
                            pointer -= 1;
                        }
                    }
                }

                State::SpecialAuthoritySlashes => {
                    if c == Some('/') && has_prefix(input, pointer + 1, "/") {
                        state = State::SpecialAuthorityIgnoreSlashes;
                        pointer += 1;
                    } else {
                        self.violation(SyntaxViolation::ExpectedDoubleSlash);
                        state = State::SpecialAuthorityIgnoreSlashes;
                        pointer -= 1;
                    }
                }

                State::SpecialAuthorityIgnoreSlashes => {
                    if matches!(c, Some('/') | Some('\\')) {
                        self.violation(SyntaxViolation::ExpectedDoubleSlash);
                    } else {
                        state = State::Authority;
                        pointer -= 1;
                    }
                }

                State::Authority => {
                    if c == Some('@') {
                        self.violation(SyntaxViolation::EmbeddedCredentials);
                        if at_sign_seen {
                            // A second @: the earlier one belonged to the
                            // userinfo after all.
                            buffer.insert_str(0, "%40");
                        }
                        at_sign_seen = true;
                        for cp in buffer.chars() {
                            if cp == ':' && !password_token_seen {
                                password_token_seen = true;
                                continue;
                            }
                            if password_token_seen {
                                append_encoded(cp, DEFAULT_ENCODE_SET, &mut url.password);
                            } else {
                                append_encoded(cp, DEFAULT_ENCODE_SET, &mut url.username);
                            }
                        }
                        buffer.clear();
                    } else if matches!(c, None | Some('/') | Some('?') | Some('#'))
                        || (c == Some('\\') && is_special_scheme(&url.scheme))
                    {
                        if at_sign_seen && buffer.is_empty() {
                            return Err(ParseError::EmptyHost);
                        }
                        // Rewind past the buffered code points and re-parse
                        // them as a host.
                        pointer -= buffer.chars().count() as isize + 1;
                        buffer.clear();
                        state = State::Host;
                    } else if let Some(c) = c {
                        buffer.push(c);
                    }
                }

                State::Host | State::Hostname => {
                    if state_override.is_some() && url.scheme == "file" {
                        state = State::FileHost;
                        pointer -= 1;
                    } else if c == Some(':') && !inside_brackets {
                        if buffer.is_empty() {
                            return Err(ParseError::EmptyHost);
                        }
                        if state_override == Some(State::Hostname) {
                            return Ok(());
                        }
                        let host = self.parse_host(&buffer, &url.scheme)?;
                        url.host = Some(host);
                        buffer.clear();
                        state = State::Port;
                    } else if matches!(c, None | Some('/') | Some('?') | Some('#'))
                        || (c == Some('\\') && is_special_scheme(&url.scheme))
                    {
                        pointer -= 1;
                        if is_special_scheme(&url.scheme) && buffer.is_empty() {
                            return Err(ParseError::EmptyHost);
                        }
                        if state_override.is_some()
                            && buffer.is_empty()
                            && (url.has_credentials() || url.port.is_some())
                        {
                            return Ok(());
                        }
                        let host = self.parse_host(&buffer, &url.scheme)?;
                        url.host = Some(host);
                        buffer.clear();
                        if state_override.is_some() {
                            return Ok(());
                        }
                        state = State::PathStart;
                    } else if let Some(c) = c {
                        if c == '[' {
                            inside_brackets = true;
                        }
                        if c == ']' {
                            inside_brackets = false;
                        }
                        buffer.push(c);
                    }
                }

                State::Port => {
                    if let Some(c) = c.filter(|c| c.is_ascii_digit()) {
                        buffer.push(c);
                    } else if matches!(c, None | Some('/') | Some('?') | Some('#'))
                        || (c == Some('\\') && is_special_scheme(&url.scheme))
                        || state_override.is_some()
                    {
                        if !buffer.is_empty() {
                            let port =
                                buffer.parse::<u32>().map_err(|_| ParseError::InvalidPort)?;
                            if port > u16::MAX as u32 {
                                return Err(ParseError::InvalidPort);
                            }
                            let port = port as u16;
                            url.port = if Some(port) == default_port(&url.scheme) {
                                None
                            } else {
                                Some(port)
                            };
                            buffer.clear();
                        }
                        if state_override.is_some() {
                            return Ok(());
                        }
                        state = State::PathStart;
                        pointer -= 1;
                    } else {
                        return Err(ParseError::InvalidPort);
                    }
                }

                State::File => {
                    url.scheme = "file".to_string();
                    if matches!(c, Some('/') | Some('\\')) {
                        if c == Some('\\') {
                            self.violation(SyntaxViolation::Backslash);
                        }
                        state = State::FileSlash;
                    } else {
                        match self.base_url {
                            Some(base) if base.scheme == "file" => match c {
                                None => {
                                    url.host = base.host.clone();
                                    url.path = base.path.clone();
                                    url.query = base.query.clone();
                                }
                                Some('?') => {
                                    url.host = base.host.clone();
                                    url.path = base.path.clone();
                                    url.query = Some(String::new());
                                    state = State::Query;
                                }
                                Some('#') => {
                                    url.host = base.host.clone();
                                    url.path = base.path.clone();
                                    url.query = base.query.clone();
                                    url.fragment = Some(String::new());
                                    state = State::Fragment;
                                }
                                Some(_) => {
                                    if starts_with_windows_drive_letter(slice_from(
                                        input, pointer,
                                    )) {
                                        self.violation(SyntaxViolation::UnexpectedDriveLetter);
                                    } else {
                                        url.host = base.host.clone();
                                        url.path = base.path.clone();
                                        shorten_path(url);
                                    }
                                    state = State::Path;
                                    pointer -= 1;
                                }
                            },
                            _ => {
                                state = State::Path;
                                pointer -= 1;
                            }
                        }
                    }
                }

                State::FileSlash => {
                    if matches!(c, Some('/') | Some('\\')) {
                        if c == Some('\\') {
                            self.violation(SyntaxViolation::Backslash);
                        }
                        state = State::FileHost;
                    } else {
                        if let Some(base) = self.base_url {
                            if base.scheme == "file" {
                                url.host = base.host.clone();
                                if !starts_with_windows_drive_letter(slice_from(input, pointer))
                                {
                                    if let Some(first) = base.path.first() {
                                        // Windows drive letter quirk: the
                                        // base's drive carries over.
                                        if is_normalized_windows_drive_letter(first) {
                                            url.path.push(first.clone());
                                        }
                                    }
                                }
                            }
                        }
                        state = State::Path;
                        pointer -= 1;
                    }
                }

                State::FileHost => {
                    if matches!(c, None | Some('/') | Some('\\') | Some('?') | Some('#')) {
                        pointer -= 1;
                        if state_override.is_none() && is_windows_drive_letter(&buffer) {
                            self.violation(SyntaxViolation::FileWithHostAndWindowsDrive);
                            // buffer is not reset: the path state consumes
                            // it as the first segment.
                            state = State::Path;
                        } else if buffer.is_empty() {
                            url.host = Some(Host::Empty);
                            if state_override.is_some() {
                                return Ok(());
                            }
                            state = State::PathStart;
                        } else {
                            let mut host = self.parse_host(&buffer, &url.scheme)?;
                            if matches!(&host, Host::Domain(d) if d == "localhost") {
                                host = Host::Empty;
                            }
                            url.host = Some(host);
                            if state_override.is_some() {
                                return Ok(());
                            }
                            buffer.clear();
                            state = State::PathStart;
                        }
                    } else if let Some(c) = c {
                        buffer.push(c);
                    }
                }

                State::PathStart => {
                    if is_special_scheme(&url.scheme) {
                        if c == Some('\\') {
                            self.violation(SyntaxViolation::Backslash);
                        }
                        state = State::Path;
                        if !matches!(c, Some('/') | Some('\\')) {
                            pointer -= 1;
                        }
                    } else if state_override.is_none() && c == Some('?') {
                        url.query = Some(String::new());
                        state = State::Query;
                    } else if state_override.is_none() && c == Some('#') {
                        url.fragment = Some(String::new());
                        state = State::Fragment;
                    } else if c.is_some() {
                        state = State::Path;
                        if c != Some('/') {
                            pointer -= 1;
                        }
                    } else if state_override.is_some() && url.host.is_none() {
                        url.path.push(String::new());
                    }
                }

                State::Path => {
                    let special = is_special_scheme(&url.scheme);
                    if matches!(c, None | Some('/'))
                        || (c == Some('\\') && special)
                        || (state_override.is_none() && matches!(c, Some('?') | Some('#')))
                    {
                        if c == Some('\\') {
                            self.violation(SyntaxViolation::Backslash);
                        }
                        let ends_segment = c == Some('/') || (c == Some('\\') && special);
                        if is_double_dot_segment(&buffer) {
                            shorten_path(url);
                            if !ends_segment {
                                url.path.push(String::new());
                            }
                            buffer.clear();
                        } else if is_single_dot_segment(&buffer) {
                            if !ends_segment {
                                url.path.push(String::new());
                            }
                            buffer.clear();
                        } else {
                            if url.scheme == "file"
                                && url.path.is_empty()
                                && is_windows_drive_letter(&buffer)
                            {
                                if !matches!(url.host, None | Some(Host::Empty)) {
                                    self.violation(SyntaxViolation::FileWithHostAndWindowsDrive);
                                    url.host = Some(Host::Empty);
                                }
                                // Normalize the drive letter separator.
                                buffer.truncate(1);
                                buffer.push(':');
                            }
                            url.path.push(mem::take(&mut buffer));
                        }
                        if url.scheme == "file" && matches!(c, None | Some('?') | Some('#')) {
                            while url.path.len() > 1 && url.path[0].is_empty() {
                                self.violation(SyntaxViolation::FileLeadingEmptySegments);
                                url.path.remove(0);
                            }
                        }
                        match c {
                            Some('?') => {
                                url.query = Some(String::new());
                                state = State::Query;
                            }
                            Some('#') => {
                                url.fragment = Some(String::new());
                                state = State::Fragment;
                            }
                            _ => {}
                        }
                    } else if let Some(c) = c {
                        self.check_url_code_point(c, input, pointer);
                        append_encoded(c, DEFAULT_ENCODE_SET, &mut buffer);
                    }
                }

                State::CannotBeABaseUrlPath => match c {
                    Some('?') => {
                        url.query = Some(String::new());
                        state = State::Query;
                    }
                    Some('#') => {
                        url.fragment = Some(String::new());
                        state = State::Fragment;
                    }
                    Some(c) => {
                        self.check_url_code_point(c, input, pointer);
                        if let Some(segment) = url.path.first_mut() {
                            append_encoded(c, DEFAULT_ENCODE_SET, segment);
                        }
                    }
                    None => {}
                },

                State::Query => {
                    if state_override.is_none() && c == Some('#') {
                        url.fragment = Some(String::new());
                        state = State::Fragment;
                    } else if let Some(c) = c {
                        self.check_url_code_point(c, input, pointer);
                        if let Some(query) = url.query.as_mut() {
                            append_encoded(c, QUERY_ENCODE_SET, query);
                        }
                    }
                }

                State::Fragment => match c {
                    None => {}
                    Some('\0') => self.violation(SyntaxViolation::NullInFragment),
                    Some(c) => {
                        self.check_url_code_point(c, input, pointer);
                        if let Some(fragment) = url.fragment.as_mut() {
                            append_encoded(c, DEFAULT_ENCODE_SET, fragment);
                        }
                    }
                },
            }

            if pointer == len {
                break;
            }
            pointer += 1;
        }
        Ok(())
    }
}

/// Remove the path's last segment, unless it is a `file:` URL whose only
/// segment is a Windows drive letter.
pub(crate) fn shorten_path(url: &mut Url) {
    if url.scheme == "file"
        && url.path.len() == 1
        && is_normalized_windows_drive_letter(&url.path[0])
    {
        return;
    }
    url.path.pop();
}

fn slice_from(input: &[char], pointer: isize) -> &[char] {
    if pointer <= 0 {
        input
    } else {
        &input[(pointer as usize).min(input.len())..]
    }
}

fn has_prefix(input: &[char], from: isize, prefix: &str) -> bool {
    let slice = slice_from(input, from);
    prefix
        .chars()
        .enumerate()
        .all(|(i, c)| slice.get(i) == Some(&c))
}

/// Two code points: an ASCII alpha followed by `:` or `|`.
pub(crate) fn is_windows_drive_letter(segment: &str) -> bool {
    let mut chars = segment.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(b), None) => a.is_ascii_alphabetic() && (b == ':' || b == '|'),
        _ => false,
    }
}

/// A Windows drive letter whose separator is specifically `:`.
pub(crate) fn is_normalized_windows_drive_letter(segment: &str) -> bool {
    let mut chars = segment.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(a), Some(':'), None) => a.is_ascii_alphabetic(),
        _ => false,
    }
}

/// A Windows drive letter at the start of `input`, followed by the end of
/// the input or by `/`, `\`, `?` or `#`.
fn starts_with_windows_drive_letter(input: &[char]) -> bool {
    if input.len() < 2 {
        return false;
    }
    if !(input[0].is_ascii_alphabetic() && (input[1] == ':' || input[1] == '|')) {
        return false;
    }
    match input.get(2) {
        None => true,
        Some(&c) => matches!(c, '/' | '\\' | '?' | '#'),
    }
}

fn is_single_dot_segment(buffer: &str) -> bool {
    buffer == "." || buffer.eq_ignore_ascii_case("%2e")
}

fn is_double_dot_segment(buffer: &str) -> bool {
    buffer == ".."
        || buffer.eq_ignore_ascii_case(".%2e")
        || buffer.eq_ignore_ascii_case("%2e.")
        || buffer.eq_ignore_ascii_case("%2e%2e")
}

fn append_encoded(c: char, set: &AsciiSet, output: &mut String) {
    let mut bytes = [0u8; 4];
    utf8_percent_encode_to(c.encode_utf8(&mut bytes), set, output)
}

/// <https://url.spec.whatwg.org/#url-code-points>
fn is_url_code_point(c: char) -> bool {
    matches!(c,
        'a'..='z'
        | 'A'..='Z'
        | '0'..='9'
        | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | '-' | '.' | '/'
        | ':' | ';' | '=' | '?' | '@' | '_' | '~'
        | '\u{A0}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{1FFFD}'
        | '\u{20000}'..='\u{2FFFD}'
        | '\u{30000}'..='\u{3FFFD}'
        | '\u{40000}'..='\u{4FFFD}'
        | '\u{50000}'..='\u{5FFFD}'
        | '\u{60000}'..='\u{6FFFD}'
        | '\u{70000}'..='\u{7FFFD}'
        | '\u{80000}'..='\u{8FFFD}'
        | '\u{90000}'..='\u{9FFFD}'
        | '\u{A0000}'..='\u{AFFFD}'
        | '\u{B0000}'..='\u{BFFFD}'
        | '\u{C0000}'..='\u{CFFFD}'
        | '\u{D0000}'..='\u{DFFFD}'
        | '\u{E1000}'..='\u{EFFFD}'
        | '\u{F0000}'..='\u{FFFFD}'
        | '\u{100000}'..='\u{10FFFD}')
}
