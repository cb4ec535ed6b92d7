//! Package assembly.

use crate::error::BuildError;
use crate::size::{SizeParseError, parse_size};
use crate::target::PackageTarget;
use mockos_schema::{Package, PackageDigest, PackageDraft};
use rand::RngCore;
use std::io::ErrorKind;
use tracing::{debug, info};

/// Parameters for a new package.
#[derive(Debug, Clone)]
pub struct PackageBuilder {
    version: String,
    size: String,
    activation_fail_message: String,
    incompatible: bool,
}

impl PackageBuilder {
    /// A compatible package of `version` with `size` bytes of padding
    /// (e.g. `"10MB"`).
    pub fn new(version: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            size: size.into(),
            activation_fail_message: String::new(),
            incompatible: false,
        }
    }

    /// Flag the package so receivers refuse it after integrity passes.
    pub fn incompatible(mut self, incompatible: bool) -> Self {
        self.incompatible = incompatible;
        self
    }

    /// Carry a message that simulates a post-install activation failure.
    pub fn activation_fail_message(mut self, message: impl Into<String>) -> Self {
        self.activation_fail_message = message.into();
        self
    }

    /// Build the sealed package with freshly randomised padding.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::SizeParse`] if the size expression is malformed or
    /// too large to allocate.
    pub fn build_package(&self) -> Result<Package, BuildError> {
        let declared = parse_size(&self.size)?;
        let overflow = || SizeParseError::Overflow(self.size.clone());
        let len = usize::try_from(declared).map_err(|_| overflow())?;

        let mut padding = Vec::new();
        padding.try_reserve_exact(len).map_err(|_| overflow())?;
        padding.resize(len, 0);
        rand::rng().fill_bytes(&mut padding);

        let package = PackageDraft::new(self.version.as_str(), padding)
            .incompatible(self.incompatible)
            .activation_fail_message(self.activation_fail_message.as_str())
            .embed_digest();

        debug!(
            version = %self.version,
            padding = len,
            incompatible = self.incompatible,
            "sealed package"
        );
        Ok(package)
    }

    /// Build and serialize the package.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::SizeParse`] or [`BuildError::Encode`].
    pub fn build(&self) -> Result<Vec<u8>, BuildError> {
        self.build_package()?.to_bytes().map_err(BuildError::Encode)
    }
}

/// Build a package and return its serialized bytes.
///
/// # Errors
///
/// See [`PackageBuilder::build`].
pub fn build(
    version: &str,
    declared_size: &str,
    activation_fail_message: &str,
    incompatible: bool,
) -> Result<Vec<u8>, BuildError> {
    PackageBuilder::new(version, declared_size)
        .activation_fail_message(activation_fail_message)
        .incompatible(incompatible)
        .build()
}

/// Summary of a package written by [`generate`].
#[derive(Debug, Clone)]
pub struct GeneratedPackage {
    /// Version the package carries.
    pub version: String,
    /// Padding length in bytes.
    pub padding_len: usize,
    /// Embedded digest.
    pub digest: PackageDigest,
    /// Bytes written to the target.
    pub encoded_len: usize,
}

/// Build a package and write it to a target that must not exist yet.
///
/// The target is checked before anything is built, so an occupied target
/// costs no allocation and receives no bytes.
///
/// # Errors
///
/// Returns [`BuildError::AlreadyExists`] if the target is present, any error
/// from [`PackageBuilder::build`], or [`BuildError::Io`] from the write.
pub fn generate<T>(target: &T, builder: &PackageBuilder) -> Result<GeneratedPackage, BuildError>
where
    T: PackageTarget + ?Sized,
{
    if target.exists() {
        return Err(BuildError::AlreadyExists(target.describe()));
    }

    let package = builder.build_package()?;
    let bytes = package.to_bytes().map_err(BuildError::Encode)?;

    target.write_new(&bytes).map_err(|e| {
        if e.kind() == ErrorKind::AlreadyExists {
            BuildError::AlreadyExists(target.describe())
        } else {
            BuildError::Io(e)
        }
    })?;

    let digest = package.computed_digest();
    info!(dest = %target.describe(), version = %package.version(), %digest, "wrote package");

    Ok(GeneratedPackage {
        version: package.version().to_string(),
        padding_len: package.padding().len(),
        digest,
        encoded_len: bytes.len(),
    })
}
