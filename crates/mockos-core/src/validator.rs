//! Receiver-side package validation.
//!
//! Decode, then digest, then text, then compatibility. The first failing step
//! decides the classified error; nothing is retried. The digest is checked over
//! the raw field bytes, so corruption inside a text field reads as an integrity
//! failure and not as malformed text.

use crate::error::ValidationError;
use mockos_schema::{Package, PackageDigest, RawPackage};
use tracing::{debug, warn};

/// Detail reported with an incompatible package.
pub const UNSUPPORTED_OS_DETAIL: &str = "Unsupported OS Version";

/// Validate raw package bytes.
///
/// A cookie mismatch surfaces as [`ValidationError::Integrity`] because the
/// cookie is part of the digest input.
///
/// # Errors
///
/// Returns [`ValidationError::Parse`] if the bytes do not decode (or an intact
/// package carries non-UTF-8 text),
/// [`ValidationError::Integrity`] if the digest does not match, and
/// [`ValidationError::Incompatible`] if the package is flagged incompatible.
pub fn validate(bytes: &[u8]) -> Result<Package, ValidationError> {
    check(bytes).inspect_err(|e| warn!(kind = %e.kind(), "package rejected: {e}"))
}

fn check(bytes: &[u8]) -> Result<Package, ValidationError> {
    let raw = RawPackage::from_bytes(bytes).map_err(ValidationError::Parse)?;

    let computed = raw.computed_digest();
    if !computed.matches(raw.stored_digest()) {
        return Err(ValidationError::Integrity {
            stored: hex_or_raw(raw.stored_digest()),
            computed: computed.to_hex(),
        });
    }

    let package = raw.into_package().map_err(ValidationError::Parse)?;

    if package.is_incompatible() {
        return Err(ValidationError::Incompatible {
            detail: UNSUPPORTED_OS_DETAIL.to_string(),
        });
    }

    debug!(version = %package.version(), digest = %computed, "package validated");
    Ok(package)
}

fn hex_or_raw(stored: &[u8]) -> String {
    PackageDigest::from_slice(stored).map_or_else(
        || format!("<{} bytes>", stored.len()),
        |digest| digest.to_hex(),
    )
}
