// Copyright 2025 The weburl developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::Url;

impl Url {
    /// Getter for the `origin` attribute
    /// (<https://url.spec.whatwg.org/#dom-url-origin>).
    ///
    /// Schemes whose origin is opaque (`data`, `file`, `javascript`,
    /// `mailto`) serialize as `"null"`; a URL with no scheme or no host
    /// serializes as the empty string; everything else is
    /// `scheme://host[:port]`. `blob:` URLs are not unwrapped.
    pub fn origin(&self) -> String {
        match self.scheme.as_str() {
            "data" | "file" | "javascript" | "mailto" => "null".to_string(),
            scheme => {
                let host = self.hostname();
                if scheme.is_empty() || host.is_empty() {
                    return String::new();
                }
                match self.port {
                    Some(port) => format!("{}://{}:{}", scheme, host, port),
                    None => format!("{}://{}", scheme, host),
                }
            }
        }
    }
}
