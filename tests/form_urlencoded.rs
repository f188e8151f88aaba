// Copyright 2025 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use weburl::form_urlencoded::{byte_serialize, parse, serialize};

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|&(n, v)| (n.to_string(), v.to_string()))
        .collect()
}

#[test]
fn parse_basics() {
    assert_eq!(parse(""), owned(&[]));
    assert_eq!(parse("a=b"), owned(&[("a", "b")]));
    assert_eq!(parse("a=b&c=d"), owned(&[("a", "b"), ("c", "d")]));
    // No `=` means an empty value; a leading `=` means an empty name.
    assert_eq!(parse("a"), owned(&[("a", "")]));
    assert_eq!(parse("a="), owned(&[("a", "")]));
    assert_eq!(parse("=b"), owned(&[("", "b")]));
    // Empty pieces are dropped.
    assert_eq!(parse("&&a=b&&"), owned(&[("a", "b")]));
    // Only the first `=` splits.
    assert_eq!(parse("a=b=c"), owned(&[("a", "b=c")]));
}

#[test]
fn parse_decodes() {
    assert_eq!(parse("a+b=c+d"), owned(&[("a b", "c d")]));
    assert_eq!(parse("a%20b=%26"), owned(&[("a b", "&")]));
    assert_eq!(parse("%C3%A9=e"), owned(&[("é", "e")]));
    // A percent escape is decoded after the `=` split, so an encoded `=`
    // lands inside the name.
    assert_eq!(parse("a%3Db=1"), owned(&[("a=b", "1")]));
    // Invalid escapes pass through.
    assert_eq!(parse("a%2=b"), owned(&[("a%2", "b")]));
}

#[test]
fn serialize_basics() {
    assert_eq!(serialize(&owned(&[])), "");
    assert_eq!(serialize(&owned(&[("a", "b"), ("c", "d")])), "a=b&c=d");
    assert_eq!(serialize(&owned(&[("a b", "c&d")])), "a+b=c%26d");
    assert_eq!(serialize(&owned(&[("é", "ü")])), "%C3%A9=%C3%BC");
    // The literal set: alphanumerics and `* - . _`.
    assert_eq!(serialize(&owned(&[("A*-._z9", "")])), "A*-._z9=");
    assert_eq!(serialize(&owned(&[("~", "/")])), "%7E=%2F");
}

#[test]
fn byte_serialize_direct() {
    let mut out = String::new();
    byte_serialize("a b+c", &mut out);
    assert_eq!(out, "a+b%2Bc");
}

#[test]
fn roundtrip() {
    let pairs = owned(&[("a b", "1+2"), ("=", "&"), ("é", "ü"), ("", "")]);
    assert_eq!(parse(&serialize(&pairs)), pairs);
}
