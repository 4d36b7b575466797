//! Legacy single-quote rewriting.
//!
//! Rewrites every `'...'` span (no `'` inside) as a double-quoted string,
//! escaping embedded `"`. Spans whose content contains `{` or `[` are left
//! alone, on the guess that they are structure rather than a string.
//!
//! # Limitations
//!
//! This is a textual heuristic, not a tokenizer. Apostrophes pair up across
//! unrelated text (`// don't` followed later by `'x'`), escaped quotes such
//! as `'it\'s'` split the span, and a real string that happens to contain a
//! bracket keeps its single quotes. The literal parser reads both quote
//! styles, so the normalizer only runs this pass when
//! `normalizer.legacy_quote_pass` is set.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^']*)'").expect("single-quote pattern is valid"));

/// Apply the single-to-double quote rewrite to `src`.
pub fn normalize_quotes(src: &str) -> Cow<'_, str> {
    SINGLE_QUOTED.replace_all(src, |caps: &Captures<'_>| {
        let text = &caps[1];
        if text.contains(['{', '[']) {
            format!("'{text}'")
        } else {
            format!("\"{}\"", text.replace('"', "\\\""))
        }
    })
}
