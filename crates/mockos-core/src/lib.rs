//! Core library for mock OS packages: building, validating and persisting.
//!
//! The [`builder`] assembles a package from a version, a size expression and
//! the simulation flags; the [`validator`] turns raw bytes back into a
//! [`Package`] or an error classified for the installation protocol.

pub mod builder;
pub mod error;
pub mod size;
pub mod target;
pub mod validator;

pub use builder::{GeneratedPackage, PackageBuilder, build, generate};
pub use error::{BuildError, InstallError, InstallErrorKind, ValidationError};
pub use mockos_schema::{COOKIE, Package, PackageDigest, PackageDraft, RawPackage};
pub use size::{SizeParseError, format_size, parse_size};
pub use target::{FileTarget, PackageTarget};
pub use validator::{UNSUPPORTED_OS_DETAIL, validate};
