//! jobpatra-minify — the dataset normalizer.
//!
//! Reads a JavaScript data file made of `window.<name>Companies = [ ... ];`
//! assignments and produces the minified, sorted form:
//!
//! ```text
//! source ──► quotes (legacy, opt-in) ──► extract ──► literal ──► sort
//!                                                       │
//!        output ◄── postprocess ◄── serialize ◄─────────┘
//! ```
//!
//! Blocks that do not parse as literal data are carried through verbatim.
//! See [`normalizer::Normalizer`] for the entry point.

pub mod extract;
pub mod literal;
pub mod normalizer;
pub mod postprocess;
pub mod quotes;

pub use extract::{Block, BlockPattern};
pub use literal::{parse_value, LiteralError, LiteralErrorKind};
pub use normalizer::{normalize, BlockError, Fallback, NormalizeReport, Normalizer};
