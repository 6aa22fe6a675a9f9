//! `spdx-checkr`: validate, inspect and compare SPDX license expressions.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Initialise logging ([`init_tracing`]).
//! 3. Load config and build the effective catalog ([`config::load_config`]).
//! 4. Run the requested command against the library.
//! 5. Render the result as terminal output ([`report`]) or JSON.
//! 6. Exit `0` on success, `1` when a check fails, `2` on a malformed expression.

mod cli;
mod config;
mod report;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, OutputFormat};
use config::load_config;
use report::terminal;
use spdx_checkr::expression::expand::{clause_strings, expand};
use spdx_checkr::models::{ExpandReport, ExtractReport, SatisfiesReport};
use spdx_checkr::{extract_licenses, parse, satisfies, validate_licenses, Catalog, ExpressionError};

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "SPDX_CHECKR_LOG";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir()?;
    let config = load_config(&cwd, cli.config.as_deref())?;
    let catalog = config.catalog()?;

    match run(&cli, &catalog) {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(err) => match err.downcast_ref::<ExpressionError>() {
            Some(expr_err) => {
                eprintln!("{} {}", "error:".red().bold(), expr_err);
                std::process::exit(2);
            }
            None => Err(err),
        },
    }
}

/// Run one command; `Ok(false)` means the check itself failed.
fn run(cli: &Cli, catalog: &Catalog) -> Result<bool> {
    let json = cli.format == OutputFormat::Json;

    match &cli.command {
        Command::Validate { ids } => {
            let validation = validate_licenses(catalog, ids);
            if json {
                println!("{}", serde_json::to_string_pretty(&validation)?);
            } else {
                terminal::render_validation(catalog, ids, &validation, cli.quiet);
            }
            Ok(validation.all_valid)
        }
        Command::Extract { expression } => {
            let report = ExtractReport {
                expression: expression.clone(),
                licenses: extract_licenses(catalog, expression)?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::render_extract(&report, cli.quiet);
            }
            Ok(true)
        }
        Command::Satisfies { expression, target } => {
            let report = SatisfiesReport {
                expression: expression.clone(),
                target: target.clone(),
                satisfied: satisfies(catalog, expression, target)?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::render_satisfies(&report, cli.quiet);
            }
            Ok(report.satisfied)
        }
        Command::Expand { expression } => {
            let node = parse(catalog, expression)?;
            let report = ExpandReport {
                expression: expression.clone(),
                clauses: clause_strings(&expand(&node)),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::render_expand(&report, cli.quiet);
            }
            Ok(true)
        }
        Command::Parse { expression } => {
            let node = parse(catalog, expression)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&node)?);
            } else {
                terminal::render_tree(expression, &node, cli.quiet);
            }
            Ok(true)
        }
    }
}

/// Log to stderr, filtered by `SPDX_CHECKR_LOG` (default `warn`, `debug`
/// with `--verbose`).
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
