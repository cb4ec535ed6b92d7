//! mockos - mock OS package tool
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]
//!
//! Generates self-describing mock OS images for exercising an OS installation
//! protocol, and validates received images the way an installing target does.
//!
//! # Package layout
//!
//! ```text
//! version | cookie | padding | incompatible | activation_fail_message | digest
//! ```
//!
//! The digest covers every field before it, so any corruption of a received
//! image is reported as an integrity failure.

pub mod cmd;
pub mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Size used when `--size` is not given and `MOCKOS_SIZE` is unset.
pub const DEFAULT_SIZE: &str = "10MB";

#[derive(Debug, Parser)]
#[command(name = "mockos")]
#[command(author, version = env!("MOCKOS_VERSION"), about = "Generate and validate mock OS packages")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new package file
    Generate {
        /// Output file; must not exist yet
        #[arg(short, long)]
        file: PathBuf,
        /// Version string the package reports
        #[arg(long = "os-version")]
        os_version: String,
        /// Padding size, e.g. 512, 1KB, 10MB, 1.5GiB
        #[arg(short, long, env = "MOCKOS_SIZE", default_value = DEFAULT_SIZE)]
        size: String,
        /// Mark the package as incompatible with every target
        #[arg(long)]
        incompatible: bool,
        /// Message simulating a failure after installation, at activation
        #[arg(long, default_value = "")]
        activation_fail_message: String,
    },
    /// Validate a package file as an installing target would
    Validate {
        /// Package file
        file: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show every field of a package without enforcing validation
    Inspect {
        /// Package file
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_uses_default_size() {
        let cli = Cli::try_parse_from([
            "mockos",
            "generate",
            "--file",
            "os.img",
            "--os-version",
            "1.2.3",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                size,
                incompatible,
                activation_fail_message,
                ..
            } => {
                // MOCKOS_SIZE may be set in the environment running the tests.
                if std::env::var_os("MOCKOS_SIZE").is_none() {
                    assert_eq!(size, DEFAULT_SIZE);
                }
                assert!(!incompatible);
                assert!(activation_fail_message.is_empty());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn generate_requires_version() {
        assert!(Cli::try_parse_from(["mockos", "generate", "--file", "os.img"]).is_err());
    }
}
