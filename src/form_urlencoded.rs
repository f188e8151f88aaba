// Copyright 2025 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parser and serializer for the `application/x-www-form-urlencoded` syntax,
//! as used by HTML forms and URL query strings.
//!
//! Converts between a string (such as a URL's query string) and an ordered
//! list of name/value pairs.

use std::borrow::Borrow;

use crate::percent_encoding::{lossy_utf8_percent_decode, percent_encode_byte};

/// Convert a string in the `application/x-www-form-urlencoded` syntax into
/// an ordered list of name/value pairs.
///
/// Pieces are separated by `&`; empty pieces are dropped. Within a piece,
/// the first `=` separates the name from the value; a piece without `=` is
/// a name with an empty value. `+` stands for a space, and percent escapes
/// are decoded as UTF-8, lossily.
pub fn parse(input: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for piece in input.split('&') {
        if piece.is_empty() {
            continue;
        }
        let (name, value) = match piece.find('=') {
            Some(position) => (&piece[..position], &piece[position + 1..]),
            None => (piece, ""),
        };
        pairs.push((decode(name), decode(value)));
    }
    pairs
}

fn decode(input: &str) -> String {
    lossy_utf8_percent_decode(input.replace('+', " ").as_bytes())
}

/// Convert an ordered list of name/value pairs into a string in the
/// `application/x-www-form-urlencoded` syntax.
pub fn serialize<I, K, V>(pairs: I) -> String
where
    I: IntoIterator,
    I::Item: Borrow<(K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut output = String::new();
    for pair in pairs {
        let (name, value) = pair.borrow();
        if !output.is_empty() {
            output.push('&');
        }
        byte_serialize(name.as_ref(), &mut output);
        output.push('=');
        byte_serialize(value.as_ref(), &mut output);
    }
    output
}

/// Push one urlencoded component (a name or a value) to `output`.
///
/// A space becomes `+`, alphanumerics and `* - . _` stay literal, and every
/// other byte of the UTF-8 encoding is percent-encoded.
pub fn byte_serialize(input: &str, output: &mut String) {
    for &byte in input.as_bytes() {
        match byte {
            b' ' => output.push('+'),
            b'*' | b'-' | b'.' | b'0'..=b'9' | b'A'..=b'Z' | b'_' | b'a'..=b'z' => {
                output.push(byte as char)
            }
            _ => percent_encode_byte(byte, output),
        }
    }
}
