//! mockos - mock OS package CLI

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use mockos_cli::cmd;
use mockos_cli::{Cli, Commands};

fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            file,
            os_version,
            size,
            incompatible,
            activation_fail_message,
        } => {
            cmd::generate::generate(
                &file,
                &os_version,
                &size,
                incompatible,
                &activation_fail_message,
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { file, json } => cmd::validate::validate(&file, json),
        Commands::Inspect { file } => {
            cmd::inspect::inspect(&file)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
