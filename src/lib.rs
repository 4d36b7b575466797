//! jobpatra — build step for the job-directory dataset.
//!
//! Reads the company data file (`window.<state>Companies = [ ... ];`
//! blocks), sorts every collection by company name, and writes a compact,
//! comment-free copy. The same normalized data can be grouped into a
//! state → city → sector catalog and queried or exported as JSON.
//!
//! # Architecture
//!
//! ```text
//! data.js ──► jobpatra-minify ──► data.min.js
//!                   │
//!                   └──► Dataset ──► jobpatra-catalog ──► data.json / query
//! ```
//!
//! The whole run is synchronous: read the source, transform in memory,
//! write each destination once.

pub mod cli;

use std::fs;
use std::path::Path;

pub use jobpatra_catalog::{Catalog, Filter, Match};
pub use jobpatra_core::{Config, Dataset, Error, NamedCollection, NormalizerConfig, Record, Result};
pub use jobpatra_minify::{BlockError, Fallback, NormalizeReport, Normalizer};

/// Read the whole source file. A missing or unreadable source is fatal.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::ReadSource {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `contents` to `path` in one step: a sibling temp file is written
/// first and renamed over the destination.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    let wrap = |source| Error::WriteDestination {
        path: path.to_path_buf(),
        source,
    };
    let file_name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));
    fs::write(&tmp, contents).map_err(wrap)?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        wrap(e)
    })
}

/// Normalize the configured source and write the minified destination.
pub fn minify_file(config: &Config) -> Result<NormalizeReport> {
    let source = read_source(&config.paths.source)?;
    let report = Normalizer::new(config.normalizer.clone())?.normalize(&source);
    write_output(&config.paths.destination, &report.output)?;
    Ok(report)
}

/// Normalize the configured source and group it into a catalog.
pub fn load_catalog(config: &Config) -> Result<(NormalizeReport, Catalog)> {
    let source = read_source(&config.paths.source)?;
    let report = Normalizer::new(config.normalizer.clone())?.normalize(&source);
    let catalog = Catalog::from_dataset(&report.dataset);
    Ok((report, catalog))
}

/// Build the catalog and write it as JSON to `paths.catalog`.
pub fn export_catalog(config: &Config) -> Result<(NormalizeReport, Catalog)> {
    let (report, catalog) = load_catalog(config)?;
    write_output(&config.paths.catalog, &catalog.to_json()?)?;
    Ok((report, catalog))
}
