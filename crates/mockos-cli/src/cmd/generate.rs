//! Generate command

use crate::ui;
use anyhow::{Context, Result};
use mockos_core::{FileTarget, PackageBuilder, format_size, generate as generate_package};
use std::path::Path;
use tracing::debug;

/// Build a package and write it to `file`, refusing to overwrite.
pub fn generate(
    file: &Path,
    version: &str,
    size: &str,
    incompatible: bool,
    activation_fail_message: &str,
) -> Result<()> {
    debug!(file = %file.display(), version, size, "generating package");

    let builder = PackageBuilder::new(version, size)
        .incompatible(incompatible)
        .activation_fail_message(activation_fail_message);
    let target = FileTarget::new(file);

    let generated = generate_package(&target, &builder)
        .with_context(|| format!("Failed to generate package at {}", file.display()))?;

    ui::heading("mockos", &generated.version);
    ui::field("file", file.display());
    ui::field("padding", format_size(generated.padding_len as u64));
    ui::field("encoded", format_size(generated.encoded_len as u64));
    ui::field("digest", generated.digest);
    if incompatible {
        ui::field("incompatible", ui::yes_no(true));
    }
    if !activation_fail_message.is_empty() {
        ui::field("activation", activation_fail_message);
    }
    println!();
    ui::success(&format!("wrote {}", file.display()));

    Ok(())
}
