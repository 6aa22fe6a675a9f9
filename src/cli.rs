use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "spdx-checkr",
    about = "Validate, inspect and compare SPDX license expressions",
    version
)]
pub struct Cli {
    /// Config file [default: ./.spdx-checkr/config.toml, fallback ~/.config/spdx-checkr/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "terminal", value_name = "FORMAT", global = true)]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the verdict line
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check license identifiers against the catalog
    Validate {
        /// License, deprecated license or exception ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// List the distinct licenses of an expression
    Extract {
        expression: String,
    },
    /// Check whether one expression satisfies another
    Satisfies {
        /// Expression that is offered (e.g. a dependency's license)
        expression: String,
        /// Expression that must be met (e.g. an allowed-license policy)
        target: String,
    },
    /// Print the disjunctive normal form of an expression
    Expand {
        expression: String,
    },
    /// Print the parsed tree of an expression
    Parse {
        expression: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_satisfies_args() {
        let cli = Cli::parse_from([
            "spdx-checkr",
            "--format",
            "json",
            "satisfies",
            "MIT",
            "MIT OR Apache-2.0",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Satisfies { expression, target } => {
                assert_eq!(expression, "MIT");
                assert_eq!(target, "MIT OR Apache-2.0");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_validate_requires_ids() {
        assert!(Cli::try_parse_from(["spdx-checkr", "validate"]).is_err());
    }
}
