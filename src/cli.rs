//! Command-line surface: argument parsing and command dispatch.
//!
//! With no subcommand the tool behaves like the old build script: read
//! `data.js`, write `data.min.js`, report on stderr.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::{Config, Filter, NormalizeReport};

#[derive(Debug, Parser)]
#[command(
    name = "jobpatra",
    version,
    about = "Sort, normalize, and minify the job-directory dataset"
)]
pub struct Cli {
    /// Config file. Defaults to ./jobpatra.toml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level (overrides RUST_LOG).
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sort every collection and write the minified data file (default).
    Minify(MinifyArgs),
    /// Write the state/city/sector catalog as JSON.
    Export(ExportArgs),
    /// List the listings of one city.
    Query(QueryArgs),
}

#[derive(Debug, Default, Args)]
pub struct MinifyArgs {
    /// Source data file.
    #[arg(long)]
    pub source: Option<PathBuf>,
    /// Minified output file.
    #[arg(long)]
    pub destination: Option<PathBuf>,
    /// Rewrite single-quoted strings before extraction, as the old script did.
    #[arg(long)]
    pub legacy_quotes: bool,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Source data file.
    #[arg(long)]
    pub source: Option<PathBuf>,
    /// JSON output file.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Source data file.
    #[arg(long)]
    pub source: Option<PathBuf>,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub sector: Option<String>,
    /// Case-insensitive text matched against company names and roles.
    #[arg(long, short)]
    pub query: Option<String>,
}

impl Cli {
    /// Tracing filter directive for this invocation.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

/// Run the parsed command. Query results go to `out`; diagnostics go
/// through `tracing`.
pub fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command.unwrap_or(Command::Minify(MinifyArgs::default())) {
        Command::Minify(args) => {
            override_path(&mut config.paths.source, args.source);
            override_path(&mut config.paths.destination, args.destination);
            config.normalizer.legacy_quote_pass |= args.legacy_quotes;

            let report = crate::minify_file(&config)?;
            log_report(&report);
            tracing::info!(
                "{} created ({} collections, {} records)",
                config.paths.destination.display(),
                report.dataset.len(),
                report.record_count()
            );
        }
        Command::Export(args) => {
            override_path(&mut config.paths.source, args.source);
            override_path(&mut config.paths.catalog, args.output);

            let (report, catalog) = crate::export_catalog(&config)?;
            log_report(&report);
            tracing::info!(
                "{} created ({} states, {} listings)",
                config.paths.catalog.display(),
                catalog.states().len(),
                catalog.len()
            );
        }
        Command::Query(args) => {
            override_path(&mut config.paths.source, args.source);

            let (report, catalog) = crate::load_catalog(&config)?;
            log_report(&report);
            let filter = Filter {
                state: args.state,
                city: args.city,
                sector: args.sector,
                query: args.query,
            };
            let found = catalog.search(&filter);
            if found.is_empty() {
                writeln!(out, "No matches found.")?;
            }
            for (i, m) in found.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "{m}")?;
            }
        }
    }
    Ok(())
}

fn override_path(slot: &mut PathBuf, value: Option<PathBuf>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn log_report(report: &NormalizeReport) {
    if report.block_count() == 0 {
        tracing::warn!("no collection blocks found in source");
    }
    if !report.fallbacks.is_empty() {
        let names: Vec<&str> = report.fallbacks.iter().map(|f| f.name.as_str()).collect();
        tracing::warn!(
            "{} block(s) kept unparsed: {}",
            names.len(),
            names.join(", ")
        );
    }
}
