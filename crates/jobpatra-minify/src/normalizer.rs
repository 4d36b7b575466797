//! Normalizer — turns a dataset source into sorted, minified assignments.
//!
//! Each block is handled on its own: extract → parse → sort → serialize.
//! A block that fails any step is carried through as its original text and
//! reported as a [`Fallback`]; the rest of the run is unaffected. Fallback
//! text goes through [`postprocess::minify`] on its own, so an unbalanced
//! quote in a broken block cannot leak into the blocks after it. Rendered
//! JSON is already minimal and is appended as is.

use std::borrow::Cow;

use jobpatra_core::{Dataset, Error, NamedCollection, NormalizerConfig, Record};
use serde_json::Value;

use crate::extract::{Block, BlockPattern};
use crate::literal::{self, LiteralError};
use crate::{postprocess, quotes};

/// Why a single block could not be normalized.
#[derive(Debug, thiserror::Error)]
pub enum BlockError {
    #[error(transparent)]
    Literal(#[from] LiteralError),
    #[error("expected an array literal")]
    NotAnArray,
    #[error("record {index} is not an object")]
    NotAnObject { index: usize },
    #[error("record {index} has an unexpected shape: {source}")]
    Shape {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("cannot serialize collection: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A block that was passed through unchanged.
#[derive(Debug)]
pub struct Fallback {
    pub name: String,
    /// 1-based source line where the block starts.
    pub line: usize,
    pub error: BlockError,
}

/// Result of one normalizer run.
#[derive(Debug, Default)]
pub struct NormalizeReport {
    /// Minified output text, ready to write.
    pub output: String,
    /// Every collection that normalized successfully, in source order.
    pub dataset: Dataset,
    /// Blocks carried through as original text.
    pub fallbacks: Vec<Fallback>,
}

impl NormalizeReport {
    pub fn record_count(&self) -> usize {
        self.dataset.records().count()
    }

    /// Blocks seen, normalized or not.
    pub fn block_count(&self) -> usize {
        self.dataset.len() + self.fallbacks.len()
    }
}

/// Block pattern plus sort settings, compiled once.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizerConfig,
    pattern: BlockPattern,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Result<Self, Error> {
        config.validate()?;
        let pattern = BlockPattern::new(&config.prefix, &config.suffix)
            .map_err(|e| Error::Configuration(format!("invalid block pattern: {e}")))?;
        Ok(Self { config, pattern })
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize every block in `source`.
    pub fn normalize(&self, source: &str) -> NormalizeReport {
        let source = if self.config.legacy_quote_pass {
            quotes::normalize_quotes(source)
        } else {
            Cow::Borrowed(source)
        };

        let mut assembled = String::with_capacity(source.len());
        let mut report = NormalizeReport::default();

        for block in self.pattern.extract(&source) {
            let result = self
                .normalize_block(&block)
                .and_then(|collection| Ok((self.render(&collection)?, collection)));
            match result {
                Ok((assignment, collection)) => {
                    tracing::debug!(
                        collection = %collection.name,
                        records = collection.len(),
                        "normalized block"
                    );
                    assembled.push_str(&assignment);
                    report.dataset.push(collection);
                }
                Err(error) => {
                    tracing::warn!(
                        collection = block.name,
                        line = block.line,
                        %error,
                        "could not parse block, keeping original text"
                    );
                    assembled.push_str(&postprocess::minify(block.text));
                    report.fallbacks.push(Fallback {
                        name: block.name.to_string(),
                        line: block.line,
                        error,
                    });
                }
            }
        }

        report.output = assembled;
        tracing::info!(
            collections = report.dataset.len(),
            records = report.record_count(),
            fallbacks = report.fallbacks.len(),
            "normalized dataset"
        );
        report
    }

    /// Parse and sort one block.
    pub fn normalize_block(&self, block: &Block<'_>) -> Result<NamedCollection, BlockError> {
        let items = match literal::parse_value(block.body)? {
            Value::Array(items) => items,
            _ => return Err(BlockError::NotAnArray),
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                if !item.is_object() {
                    return Err(BlockError::NotAnObject { index });
                }
                serde_json::from_value::<Record>(item)
                    .map_err(|source| BlockError::Shape { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut collection = NamedCollection::new(block.name, records);
        collection.sort_by_field(&self.config.sort_key);
        Ok(collection)
    }

    /// `<prefix>.<name>=<json>;`
    pub fn render(&self, collection: &NamedCollection) -> Result<String, BlockError> {
        let json = serde_json::to_string(&collection.records).map_err(BlockError::Serialize)?;
        Ok(format!("{}.{}={json};", self.config.prefix, collection.name))
    }
}

/// One-shot helper: build a [`Normalizer`] and run it over `source`.
pub fn normalize(source: &str, config: &NormalizerConfig) -> Result<NormalizeReport, Error> {
    Ok(Normalizer::new(config.clone())?.normalize(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> NormalizeReport {
        normalize(source, &NormalizerConfig::default()).unwrap()
    }

    #[test]
    fn sorts_and_minifies_one_block() {
        let report = run("window.goaCompanies = [\n  {company: 'Zoho', roles: ['Dev']},\n  {company: \"acme\"}\n];");
        assert_eq!(
            report.output,
            r#"window.goaCompanies=[{"company":"acme"},{"company":"Zoho","roles":["Dev"]}];"#
        );
        assert!(report.fallbacks.is_empty());
        assert_eq!(report.record_count(), 2);
    }

    #[test]
    fn non_literal_block_falls_back() {
        let report = run("window.badCompanies = [ {company: doSomething()} ];");
        assert_eq!(report.output, "window.badCompanies = [ {company: doSomething()} ];");
        assert_eq!(report.fallbacks.len(), 1);
        assert_eq!(report.fallbacks[0].name, "badCompanies");
        assert!(matches!(report.fallbacks[0].error, BlockError::Literal(_)));
        assert!(report.dataset.is_empty());
    }

    #[test]
    fn unbalanced_quote_in_fallback_stays_in_its_block() {
        let report = run(concat!(
            "window.aCompanies = [ {company: \"x} ];\n",
            "window.bCompanies = [ {company: 'Tata  Steel', career: 'https://b.com/jobs'} ];"
        ));
        assert_eq!(
            report.output,
            concat!(
                r#"window.aCompanies = [ {company: "x} ];"#,
                r#"window.bCompanies=[{"company":"Tata  Steel","career":"https://b.com/jobs"}];"#
            )
        );
        assert_eq!(report.fallbacks.len(), 1);
    }

    #[test]
    fn wrong_field_type_falls_back() {
        let report = run("window.aCompanies = [{company: 42}];");
        assert!(matches!(
            report.fallbacks[0].error,
            BlockError::Shape { index: 0, .. }
        ));
    }

    #[test]
    fn non_object_item_falls_back() {
        let report = run("window.aCompanies = [{company: 'A'}, 'B'];");
        assert!(matches!(
            report.fallbacks[0].error,
            BlockError::NotAnObject { index: 1 }
        ));
    }

    #[test]
    fn custom_sort_key() {
        let config = NormalizerConfig {
            sort_key: "city".into(),
            ..NormalizerConfig::default()
        };
        let report = normalize(
            "window.aCompanies = [{company: 'A', city: 'Pune'}, {company: 'B', city: 'Agra'}];",
            &config,
        )
        .unwrap();
        assert_eq!(
            report.output,
            r#"window.aCompanies=[{"company":"B","city":"Agra"},{"company":"A","city":"Pune"}];"#
        );
    }

    #[test]
    fn legacy_quote_pass_rewrites_fallback_text() {
        let config = NormalizerConfig {
            legacy_quote_pass: true,
            ..NormalizerConfig::default()
        };
        let report = normalize("window.aCompanies = [{company: f('x')}];", &config).unwrap();
        assert_eq!(report.output, r#"window.aCompanies = [{company: f("x")}];"#);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = NormalizerConfig {
            prefix: "bad prefix".into(),
            ..NormalizerConfig::default()
        };
        assert!(matches!(Normalizer::new(config), Err(Error::Configuration(_))));
    }
}
