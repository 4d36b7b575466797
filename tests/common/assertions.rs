//! Domain-specific assertion macros for jobpatra harnesses.
//!
//! These wrap plain panics with context-rich failure messages that make it
//! clear which output invariant was violated and where in the text.

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Assert that a collection's records are in ascending collation order of
/// `company`.
///
/// ```rust
/// assert_sorted!(collection);
/// ```
#[macro_export]
macro_rules! assert_sorted {
    ($collection:expr) => {{
        let collection: &jobpatra_core::NamedCollection = &$collection;
        for pair in collection.records.windows(2) {
            let a = pair[0].company.as_deref().unwrap_or("");
            let b = pair[1].company.as_deref().unwrap_or("");
            if jobpatra_core::collate(a, b) == std::cmp::Ordering::Greater {
                panic!(
                    "assert_sorted! failed in {:?}:\n  {:?}\n  sorts after\n  {:?}",
                    collection.name, a, b
                );
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Output text
// ---------------------------------------------------------------------------

/// Assert that no `//` appears outside a double-quoted string.
#[macro_export]
macro_rules! assert_no_line_comments {
    ($output:expr) => {{
        let output: &str = &$output;
        for (offset, segment) in $crate::common::assertions::outside_strings(output) {
            if let Some(at) = segment.find("//") {
                panic!(
                    "assert_no_line_comments! failed: `//` at byte {}\n  near: {:?}",
                    offset + at,
                    &output[(offset + at).saturating_sub(20)..(offset + at + 2).min(output.len())]
                );
            }
        }
    }};
}

/// Assert that no run of two or more whitespace characters appears outside
/// a double-quoted string.
#[macro_export]
macro_rules! assert_whitespace_collapsed {
    ($output:expr) => {{
        let output: &str = &$output;
        for (offset, segment) in $crate::common::assertions::outside_strings(output) {
            let mut prev_ws = false;
            for (i, c) in segment.char_indices() {
                if c.is_whitespace() && prev_ws {
                    panic!(
                        "assert_whitespace_collapsed! failed: whitespace run at byte {}\n  output: {:?}",
                        offset + i,
                        output
                    );
                }
                prev_ws = c.is_whitespace();
            }
        }
    }};
}

/// Split `output` into the pieces that lie outside `"..."` strings, with
/// their byte offsets. Backslash escapes inside strings are honoured.
pub fn outside_strings(output: &str) -> Vec<(usize, &str)> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in output.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => {
                    in_string = false;
                    start = i + 1;
                }
                _ => {}
            }
        } else if c == '"' {
            pieces.push((start, &output[start..i]));
            in_string = true;
        }
    }
    if !in_string {
        pieces.push((start, &output[start..]));
    }
    pieces
}
