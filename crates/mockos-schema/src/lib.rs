//! Wire format and integrity primitives for mock OS packages.
//!
//! A mock OS package stands in for an installable image when exercising an
//! installation protocol. It carries a version, a format cookie, random
//! padding, an incompatibility flag, an activation-fail message and a digest
//! over all of those fields.

pub mod digest;
pub mod package;

// Re-exports
pub use digest::{DIGEST_LEN, PackageDigest};
pub use package::{COOKIE, CodecError, Package, PackageDraft, RawPackage};
