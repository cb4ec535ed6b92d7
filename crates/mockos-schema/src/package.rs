//! The package entity and its postcard wire format.
//!
//! Construction is two-phase: a [`PackageDraft`] holds the semantic fields and
//! [`PackageDraft::embed_digest`] seals it into an immutable [`Package`].
//!
//! Decoding is two-phase too. [`RawPackage`] is the record exactly as it sits
//! on the wire, text fields included as raw bytes, so its digest can be
//! checked before anything is assumed about the text. [`RawPackage::into_package`]
//! then checks UTF-8.

use crate::digest::PackageDigest;
use serde::{Deserialize, Serialize};
use std::string::FromUtf8Error;

/// Format marker carried by every package and folded into its digest.
pub const COOKIE: &str = "cookiestring";

/// Errors from encoding or decoding the package wire format.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    /// The package could not be serialized.
    #[error("failed to encode package: {0}")]
    Encode(#[source] postcard::Error),

    /// The bytes are not a well-formed package record.
    #[error("failed to decode package: {0}")]
    Decode(#[source] postcard::Error),

    /// A complete record was decoded but bytes were left over.
    #[error("{0} trailing bytes after package record")]
    TrailingBytes(usize),

    /// A text field holds bytes that are not UTF-8.
    #[error("package field `{field}` is not valid UTF-8")]
    InvalidText {
        /// Name of the offending field.
        field: &'static str,
        /// Underlying conversion error.
        #[source]
        source: FromUtf8Error,
    },
}

/// Semantic fields of a package before its digest is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDraft {
    version: String,
    padding: Vec<u8>,
    incompatible: bool,
    activation_fail_message: String,
}

impl PackageDraft {
    /// Start a compatible draft with no activation-fail message.
    pub fn new(version: impl Into<String>, padding: Vec<u8>) -> Self {
        Self {
            version: version.into(),
            padding,
            incompatible: false,
            activation_fail_message: String::new(),
        }
    }

    /// Mark the package as one a receiver must refuse to install.
    pub fn incompatible(mut self, incompatible: bool) -> Self {
        self.incompatible = incompatible;
        self
    }

    /// Set the message that simulates a post-install activation failure.
    pub fn activation_fail_message(mut self, message: impl Into<String>) -> Self {
        self.activation_fail_message = message.into();
        self
    }

    /// Compute the digest these fields will carry once sealed.
    pub fn digest(&self) -> PackageDigest {
        PackageDigest::compute(
            self.version.as_bytes(),
            COOKIE.as_bytes(),
            &self.padding,
            self.incompatible,
            self.activation_fail_message.as_bytes(),
        )
    }

    /// Compute the digest and seal the draft into a [`Package`].
    pub fn embed_digest(self) -> Package {
        let digest = self.digest();
        Package {
            version: self.version,
            cookie: COOKIE.to_string(),
            padding: self.padding,
            incompatible: self.incompatible,
            activation_fail_message: self.activation_fail_message,
            digest: digest.as_bytes().to_vec(),
        }
    }
}

/// A sealed package with text fields known to be UTF-8.
///
/// Field order is the wire order. Postcard lays out a `String` and a
/// `Vec<u8>` identically (varint length, then bytes), so a `Package`
/// serializes to exactly what [`RawPackage`] decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    version: String,
    cookie: String,
    padding: Vec<u8>,
    incompatible: bool,
    activation_fail_message: String,
    digest: Vec<u8>,
}

impl Package {
    /// Image revision string.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Format marker as carried by this package.
    pub fn cookie(&self) -> &str {
        &self.cookie
    }

    /// Filler payload.
    pub fn padding(&self) -> &[u8] {
        &self.padding
    }

    /// Whether the author flagged this package as not installable.
    pub fn is_incompatible(&self) -> bool {
        self.incompatible
    }

    /// Activation-fail message, possibly empty.
    pub fn activation_fail_message(&self) -> &str {
        &self.activation_fail_message
    }

    /// The activation-fail message if one was set.
    pub fn activation_failure(&self) -> Option<&str> {
        Some(self.activation_fail_message.as_str()).filter(|m| !m.is_empty())
    }

    /// Digest bytes embedded in the package.
    pub fn stored_digest(&self) -> &[u8] {
        &self.digest
    }

    /// Digest over the package's current field values.
    pub fn computed_digest(&self) -> PackageDigest {
        PackageDigest::compute(
            self.version.as_bytes(),
            self.cookie.as_bytes(),
            &self.padding,
            self.incompatible,
            self.activation_fail_message.as_bytes(),
        )
    }

    /// Whether the embedded digest exactly matches the recomputed one.
    pub fn verify_digest(&self) -> bool {
        self.computed_digest().matches(&self.digest)
    }

    /// Serialize to the wire format.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] if postcard fails to serialize the record.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        postcard::to_allocvec(self).map_err(CodecError::Encode)
    }

    /// Decode a package from the wire format without verifying its digest.
    ///
    /// # Errors
    ///
    /// Any error from [`RawPackage::from_bytes`] or [`RawPackage::into_package`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        RawPackage::from_bytes(bytes)?.into_package()
    }
}

/// A package record as decoded from the wire, before any text is checked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawPackage {
    version: Vec<u8>,
    cookie: Vec<u8>,
    padding: Vec<u8>,
    incompatible: bool,
    activation_fail_message: Vec<u8>,
    digest: Vec<u8>,
}

impl RawPackage {
    /// Decode the wire record.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] for malformed or truncated input and
    /// [`CodecError::TrailingBytes`] if anything follows the record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let (raw, rest) = postcard::take_from_bytes::<Self>(bytes).map_err(CodecError::Decode)?;
        if !rest.is_empty() {
            return Err(CodecError::TrailingBytes(rest.len()));
        }
        Ok(raw)
    }

    /// Version field bytes.
    pub fn version_bytes(&self) -> &[u8] {
        &self.version
    }

    /// Cookie field bytes.
    pub fn cookie_bytes(&self) -> &[u8] {
        &self.cookie
    }

    /// Filler payload.
    pub fn padding(&self) -> &[u8] {
        &self.padding
    }

    /// Whether the author flagged this package as not installable.
    pub fn is_incompatible(&self) -> bool {
        self.incompatible
    }

    /// Activation-fail message bytes.
    pub fn activation_fail_message_bytes(&self) -> &[u8] {
        &self.activation_fail_message
    }

    /// Digest bytes embedded in the package.
    pub fn stored_digest(&self) -> &[u8] {
        &self.digest
    }

    /// Digest over the record's field bytes.
    pub fn computed_digest(&self) -> PackageDigest {
        PackageDigest::compute(
            &self.version,
            &self.cookie,
            &self.padding,
            self.incompatible,
            &self.activation_fail_message,
        )
    }

    /// Whether the embedded digest exactly matches the recomputed one.
    pub fn verify_digest(&self) -> bool {
        self.computed_digest().matches(&self.digest)
    }

    /// Check the text fields and convert into a [`Package`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidText`] naming the first field that is not
    /// UTF-8.
    pub fn into_package(self) -> Result<Package, CodecError> {
        Ok(Package {
            version: text("version", self.version)?,
            cookie: text("cookie", self.cookie)?,
            padding: self.padding,
            incompatible: self.incompatible,
            activation_fail_message: text(
                "activation_fail_message",
                self.activation_fail_message,
            )?,
            digest: self.digest,
        })
    }
}

fn text(field: &'static str, bytes: Vec<u8>) -> Result<String, CodecError> {
    String::from_utf8(bytes).map_err(|source| CodecError::InvalidText { field, source })
}
