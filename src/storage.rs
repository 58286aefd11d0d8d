//! The managed output directory (`<root>/.images`).
//!
//! Both write paths call [`OutputDir::ensure`] right before creating their
//! output file. The call is idempotent: a missing directory is created with
//! mode `0o750` on Unix, an existing one is left untouched.
//!
//! A regular file squatting on `.images` is reported as
//! [`StorageError::NotADirectory`] rather than surfacing later as a confusing
//! "not a directory" I/O error from the file create.
//!
//! There is no locking. Two processes writing the same output name race at
//! the filesystem level and the last writer wins.

use crate::naming::IMAGE_DIR_NAME;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Permission bits for a freshly created image directory.
#[cfg(unix)]
pub const IMAGE_DIR_MODE: u32 = 0o750;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to inspect {path}: {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),
}

/// Handle to the managed image directory beneath a storage root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            path: root.as_ref().join(IMAGE_DIR_NAME),
        }
    }

    /// `<root>/.images`, whether or not it exists yet.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full path of `file_name` inside the directory.
    pub fn join(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    /// Create the directory if it is missing.
    ///
    /// Losing a creation race to another caller still succeeds, as long as
    /// what the winner created is a directory.
    pub fn ensure(&self) -> Result<(), StorageError> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.is_dir() => return Ok(()),
            Ok(_) => return Err(StorageError::NotADirectory(self.path.clone())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(StorageError::Inspect {
                    path: self.path.clone(),
                    source,
                });
            }
        }

        match create_dir(&self.path) {
            Ok(()) => {
                debug!("Created image directory {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && self.path.is_dir() => {
                debug!("Image directory {} appeared concurrently", self.path.display());
                Ok(())
            }
            Err(source) => Err(StorageError::Create {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(unix)]
fn create_dir(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().mode(IMAGE_DIR_MODE).create(path)
}

#[cfg(not(unix))]
fn create_dir(path: &Path) -> io::Result<()> {
    fs::create_dir(path)
}
