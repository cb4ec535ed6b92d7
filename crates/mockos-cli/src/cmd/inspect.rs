//! Inspect command

use crate::ui;
use anyhow::{Context, Result};
use mockos_core::{COOKIE, RawPackage, format_size};
use std::path::Path;

/// Decode `file` and print its fields, reporting digest status without
/// rejecting the package. Text that is not UTF-8 is shown lossily.
pub fn inspect(file: &Path) -> Result<()> {
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let package = RawPackage::from_bytes(&bytes)
        .with_context(|| format!("{} is not a mockos package", file.display()))?;

    let version = String::from_utf8_lossy(package.version_bytes());
    let cookie = String::from_utf8_lossy(package.cookie_bytes());
    let cookie = if package.cookie_bytes() == COOKIE.as_bytes() {
        cookie.into_owned()
    } else {
        format!("{cookie} (expected {COOKIE})")
    };
    let activation = package.activation_fail_message_bytes();

    ui::heading("mockos", &version);
    ui::field("cookie", cookie);
    ui::field("padding", format_size(package.padding().len() as u64));
    ui::field("incompatible", ui::yes_no(package.is_incompatible()));
    ui::field(
        "activation",
        if activation.is_empty() {
            "(none)".into()
        } else {
            String::from_utf8_lossy(activation)
        },
    );
    ui::field("digest", hex::encode(package.stored_digest()));
    println!();

    if package.verify_digest() {
        ui::success("digest verifies");
    } else {
        ui::failure(&format!(
            "digest mismatch (computed {})",
            package.computed_digest()
        ));
    }

    Ok(())
}
