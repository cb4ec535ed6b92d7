//! Stamps `mockos --version` with the nearest release tag.
//!
//! `MOCKOS_VERSION` is `git describe` of the checkout (leading `v` dropped,
//! `-dev` suffix on a dirty tree), or the crate version outside a git tree.

use std::process::Command;

/// Workspace HEAD, relative to this crate's manifest directory.
const GIT_HEAD: &str = "../../.git/HEAD";

fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty=-dev"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let described = String::from_utf8(output.stdout).ok()?;
    let tag = described.trim().trim_start_matches('v');
    (!tag.is_empty()).then(|| tag.to_string())
}

fn main() {
    println!("cargo:rerun-if-changed={GIT_HEAD}");

    let version = describe().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=MOCKOS_VERSION={version}");
}
