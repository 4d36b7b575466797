//! Configuration types for jobpatra.
//!
//! [`Config::load`] layers an optional `jobpatra.toml` and `JOBPATRA_*`
//! environment variables over the built-in defaults. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in
//! tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Error;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[paths]
source      = "data.js"
destination = "data.min.js"
catalog     = "data.json"

[normalizer]
prefix            = "window"
suffix            = "Companies"
sort_key          = "company"
legacy_quote_pass = false
"#;

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "jobpatra.toml";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
}

/// `[paths]` section of `jobpatra.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_source")]
    pub source: PathBuf,
    #[serde(default = "default_destination")]
    pub destination: PathBuf,
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,
}

fn default_source() -> PathBuf { PathBuf::from("data.js") }
fn default_destination() -> PathBuf { PathBuf::from("data.min.js") }
fn default_catalog() -> PathBuf { PathBuf::from("data.json") }

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            destination: default_destination(),
            catalog: default_catalog(),
        }
    }
}

/// `[normalizer]` section of `jobpatra.toml`.
///
/// Blocks are recognised as `<prefix>.<word>*<suffix> = [ ... ];`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_suffix")]
    pub suffix: String,
    #[serde(default = "default_sort_key")]
    pub sort_key: String,
    /// Run the single-quote rewriting pass before extraction. The literal
    /// parser reads both quote styles, so this only matters for reproducing
    /// fallback output byte for byte.
    #[serde(default)]
    pub legacy_quote_pass: bool,
}

fn default_prefix() -> String { "window".to_string() }
fn default_suffix() -> String { "Companies".to_string() }
fn default_sort_key() -> String { "company".to_string() }

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            suffix: default_suffix(),
            sort_key: default_sort_key(),
            legacy_quote_pass: false,
        }
    }
}

impl NormalizerConfig {
    /// Reject values that cannot form a block pattern.
    pub fn validate(&self) -> Result<(), Error> {
        if !is_identifier(&self.prefix) {
            return Err(Error::Configuration(format!(
                "normalizer.prefix must be an identifier, got {:?}",
                self.prefix
            )));
        }
        if !self.suffix.chars().all(is_word_char) {
            return Err(Error::Configuration(format!(
                "normalizer.suffix must contain only word characters, got {:?}",
                self.suffix
            )));
        }
        if self.sort_key.trim().is_empty() {
            return Err(Error::Configuration("normalizer.sort_key is empty".into()));
        }
        Ok(())
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| is_word_char(c) || c == '$')
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration, layered on top of the built-in defaults.
    ///
    /// `path` must exist when given explicitly; otherwise `jobpatra.toml`
    /// in the working directory is used if present.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("JOBPATRA")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        cfg.normalizer.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
