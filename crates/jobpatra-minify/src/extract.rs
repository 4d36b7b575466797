//! Block extraction — finds `<prefix>.<name><suffix> = [ ... ];` assignments.
//!
//! Matching is non-greedy with dot-matches-newline: a block runs from its
//! opening `[` to the first `];` after it. Text between blocks is ignored.

use regex::Regex;

/// One matched assignment, borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Collection identifier, e.g. `andhraPradeshCompanies`.
    pub name: &'a str,
    /// The bracketed array literal, `[` through `]`.
    pub body: &'a str,
    /// The whole matched assignment, as written in the source.
    pub text: &'a str,
    /// 1-based line of the first character of the block.
    pub line: usize,
}

/// Compiled block pattern for a given prefix and suffix.
#[derive(Debug, Clone)]
pub struct BlockPattern {
    regex: Regex,
}

impl BlockPattern {
    pub fn new(prefix: &str, suffix: &str) -> Result<Self, regex::Error> {
        let pattern = format!(
            r"(?s){}\.([0-9A-Za-z_]+{})\s*=\s*(\[.*?\]);",
            regex::escape(prefix),
            regex::escape(suffix),
        );
        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    /// Every non-overlapping block in `src`, in source order.
    pub fn extract<'a>(&self, src: &'a str) -> Vec<Block<'a>> {
        let mut line = 1;
        let mut scanned = 0;
        self.regex
            .captures_iter(src)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                line += src[scanned..whole.start()].matches('\n').count();
                scanned = whole.start();
                Some(Block {
                    name: caps.get(1)?.as_str(),
                    body: caps.get(2)?.as_str(),
                    text: whole.as_str(),
                    line,
                })
            })
            .collect()
    }
}

/// Extract blocks with a one-off pattern.
pub fn extract_blocks<'a>(src: &'a str, prefix: &str, suffix: &str) -> Result<Vec<Block<'a>>, regex::Error> {
    Ok(BlockPattern::new(prefix, suffix)?.extract(src))
}
