//! Build and validation errors.
//!
//! Validation failures map onto the installation protocol's error types via
//! [`ValidationError::to_install_error`].

use crate::size::SizeParseError;
use mockos_schema::CodecError;
use serde::Serialize;
use thiserror::Error;

/// Errors from building and persisting a package.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The destination is already present; nothing was built or written.
    #[error("target already exists: {0}")]
    AlreadyExists(String),

    /// The declared size could not be parsed.
    #[error("invalid package size: {0}")]
    SizeParse(#[from] SizeParseError),

    /// The sealed package could not be serialized.
    #[error("failed to serialize package")]
    Encode(#[source] CodecError),

    /// The file target failed while writing.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error types of the installation protocol that validation can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallErrorKind {
    /// The bytes are not a well-formed package.
    ParseFail,
    /// The embedded digest does not match the package's fields.
    IntegrityFail,
    /// The package declares itself incompatible with the receiver.
    Incompatible,
}

impl std::fmt::Display for InstallErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ParseFail => "PARSE_FAIL",
            Self::IntegrityFail => "INTEGRITY_FAIL",
            Self::Incompatible => "INCOMPATIBLE",
        };
        f.write_str(name)
    }
}

/// Protocol-facing error value: a kind plus an optional detail string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallError {
    /// Classified failure.
    #[serde(rename = "type")]
    pub kind: InstallErrorKind,
    /// Extra human-readable detail, only set for some kinds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A package rejected by [`crate::validate`].
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Decoding failed.
    #[error("failed to parse package: {0}")]
    Parse(#[source] CodecError),

    /// Decoding succeeded but the digest does not match.
    #[error("package digest mismatch: stored {stored}, computed {computed}")]
    Integrity {
        /// Hex of the digest carried by the package.
        stored: String,
        /// Hex of the digest recomputed from its fields.
        computed: String,
    },

    /// The package is intact but flagged incompatible.
    #[error("package rejected: {detail}")]
    Incompatible {
        /// Fixed reason reported to the protocol.
        detail: String,
    },
}

impl ValidationError {
    /// Protocol classification of this failure.
    pub fn kind(&self) -> InstallErrorKind {
        match self {
            Self::Parse(_) => InstallErrorKind::ParseFail,
            Self::Integrity { .. } => InstallErrorKind::IntegrityFail,
            Self::Incompatible { .. } => InstallErrorKind::Incompatible,
        }
    }

    /// Detail string reported alongside the kind, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Incompatible { detail } => Some(detail),
            Self::Parse(_) | Self::Integrity { .. } => None,
        }
    }

    /// The value the installation protocol reports for this failure.
    pub fn to_install_error(&self) -> InstallError {
        InstallError {
            kind: self.kind(),
            detail: self.detail().map(str::to_string),
        }
    }
}
