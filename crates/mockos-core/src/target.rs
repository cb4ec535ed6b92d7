//! Destinations a built package is written to.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// A create-if-absent destination for package bytes.
pub trait PackageTarget {
    /// Name used in errors and logs.
    fn describe(&self) -> String;

    /// Whether something already occupies the target.
    fn exists(&self) -> bool;

    /// Write `bytes` to a target that must not exist yet.
    ///
    /// Returns only after the full sequence is durable. On failure nothing
    /// partial is left behind.
    ///
    /// # Errors
    ///
    /// Fails with [`ErrorKind::AlreadyExists`] if the target is present, or
    /// with the underlying I/O error.
    fn write_new(&self, bytes: &[u8]) -> io::Result<()>;
}

/// A package file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileTarget {
    path: PathBuf,
}

impl FileTarget {
    /// Target the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the target file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PackageTarget for FileTarget {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    // Anything other than a clean NotFound counts as present.
    fn exists(&self) -> bool {
        match fs::symlink_metadata(&self.path) {
            Ok(_) => true,
            Err(e) => e.kind() != ErrorKind::NotFound,
        }
    }

    fn write_new(&self, bytes: &[u8]) -> io::Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)?;

        if let Err(e) = write_synced(file, bytes) {
            if let Err(cleanup) = fs::remove_file(&self.path) {
                warn!(path = %self.path.display(), error = %cleanup, "failed to remove partial package");
            }
            return Err(e);
        }
        Ok(())
    }
}

fn write_synced(file: File, bytes: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    file.sync_all()
}
