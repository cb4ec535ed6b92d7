//! Validate command

use crate::ui;
use anyhow::{Context, Result};
use mockos_core::{InstallError, validate as validate_package};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

/// JSON report printed by `validate --json`.
#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
enum Report<'a> {
    Ok {
        version: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        activation_fail_message: Option<&'a str>,
    },
    Error {
        error: InstallError,
        message: String,
    },
}

/// Validate the package in `file`; a rejected package exits non-zero.
pub fn validate(file: &Path, json: bool) -> Result<ExitCode> {
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    match validate_package(&bytes) {
        Ok(package) => {
            if json {
                let report = Report::Ok {
                    version: package.version(),
                    activation_fail_message: package.activation_failure(),
                };
                println!("{}", serde_json::to_string(&report)?);
            } else {
                ui::success(&format!("{} is valid (version {})", file.display(), package.version()));
                if let Some(message) = package.activation_failure() {
                    ui::field("activation", message);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if json {
                let report = Report::Error {
                    error: e.to_install_error(),
                    message: e.to_string(),
                };
                println!("{}", serde_json::to_string(&report)?);
            } else {
                ui::failure(&format!("{}: {e}", e.kind()));
                if let Some(detail) = e.detail() {
                    ui::field("detail", detail);
                }
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
