//! Pre-decode cleanup of analysis payloads
//!
//! The analysis service serializes pandas output with Python's `json`
//! module, which writes `NaN`, `Infinity` and `-Infinity` as bare tokens.
//! None of those are JSON, so a strict decoder rejects the whole body.
//! Rewriting them to `null` has to happen on the raw text, before decoding.
//! String literals are copied through untouched.

use regex::Regex;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::sync::LazyLock;

use crate::error::Result;

/// Matches a complete JSON string literal, or a bare non-finite token
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|-?\bInfinity\b|\bNaN\b"#)
        .expect("sanitizer pattern is valid")
});

/// Replace every bare `NaN` / `Infinity` / `-Infinity` token with `null`
///
/// Returns the input unchanged (borrowed) when there is nothing to replace.
pub fn sanitize(raw: &str) -> Cow<'_, str> {
    TOKEN_RE.replace_all(raw, |caps: &regex::Captures<'_>| {
        let matched = &caps[0];
        if matched.starts_with('"') {
            matched.to_string()
        } else {
            "null".to_string()
        }
    })
}

/// Sanitize then decode
pub fn parse<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let cleaned = sanitize(raw);
    Ok(serde_json::from_str(&cleaned)?)
}
