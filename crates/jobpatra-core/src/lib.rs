//! jobpatra-core — shared vocabulary for the jobpatra workspace.
//!
//! This crate holds the types every other layer speaks in: the company
//! [`Record`], the [`NamedCollection`] and [`Dataset`] the normalizer
//! produces, the fatal [`Error`] type, and the layered [`Config`].
//!
//! # Architecture
//!
//! ```text
//! data.js ──► Normalizer ──► data.min.js
//!                 │
//!                 └──► Dataset ──► Catalog ──► data.json / query
//! ```
//!
//! Data flows by value. Nothing is shared through globals.

pub mod config;
pub mod error;
pub mod types;

pub use config::{Config, NormalizerConfig, PathsConfig};
pub use error::{Error, Result};
pub use types::{collate, collation_key, Dataset, NamedCollection, Record};
