/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::time::Duration;

use super::ValueMap;

/// Parse a request `Cookie` header value of the form
/// `name=value; name=value` into an exact-key map.
///
/// Values are kept opaque. Segments without `=` are skipped.
pub fn parse_cookie_header(value: &str) -> ValueMap {
    let mut map = ValueMap::new();
    for item in value.split(';') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if let Some((name, value)) = item.split_once('=') {
            map.add(name.trim(), value.trim());
        }
    }
    map
}

/// Builder for a response `Set-Cookie` header value.
#[derive(Clone, Debug)]
pub struct SetCookie {
    name: String,
    value: String,
    max_age: Option<Duration>,
    expired: bool,
}

impl SetCookie {
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        SetCookie {
            name: name.into(),
            value: value.into(),
            max_age: None,
            expired: false,
        }
    }

    pub fn max_age(mut self, age: Duration) -> Self {
        self.max_age = Some(age);
        self
    }

    /// Turn this into a deletion cookie: the value is dropped and the
    /// client is told to expire it immediately.
    pub fn expired(mut self) -> Self {
        self.expired = true;
        self
    }
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expired {
            return write!(f, "{}=; Max-Age=0", self.name);
        }
        write!(f, "{}={}", self.name, self.value)?;
        if let Some(age) = self.max_age {
            write!(f, "; Max-Age={}", age.as_secs())?;
        }
        Ok(())
    }
}
