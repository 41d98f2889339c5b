//! Filesystem gateway used by the fixer.

use crate::constants;
use crate::util::path;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("cannot create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot touch {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot chmod {} to {mode:04o}: {source}", .path.display())]
    SetPermissions {
        path: PathBuf,
        mode: u32,
        #[source]
        source: io::Error,
    },

    #[error("{} is outside the project root {}", .path.display(), .root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// The three primitives the fixer needs. Each may fail on its own.
pub trait Filesystem {
    fn create_dir(&self, path: &Path) -> Result<(), FsError>;
    fn create_file(&self, path: &Path) -> Result<(), FsError>;
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<(), FsError>;
}

/// Real filesystem, with relative paths resolved against a project root.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a declared path onto the disk, refusing anything outside the root.
    pub fn resolve(&self, declared: &Path) -> Result<PathBuf, FsError> {
        path::resolve_under(&self.root, declared).ok_or_else(|| FsError::OutsideRoot {
            path: declared.to_path_buf(),
            root: self.root.clone(),
        })
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        let target = self.resolve(path)?;
        // create_dir_all is a no-op for an existing directory
        fs::create_dir_all(&target).map_err(|source| FsError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
    }

    fn create_file(&self, path: &Path) -> Result<(), FsError> {
        let target = self.resolve(path)?;
        let to_err = |source| FsError::CreateFile {
            path: path.to_path_buf(),
            source,
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&target)
            .map_err(to_err)?;
        file.set_modified(SystemTime::now()).map_err(to_err)
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<(), FsError> {
        let target = self.resolve(path)?;
        #[cfg(unix)]
        {
            let perm = fs::Permissions::from_mode(mode & constants::MODE_MASK);
            fs::set_permissions(&target, perm).map_err(|source| FsError::SetPermissions {
                path: path.to_path_buf(),
                mode,
                source,
            })?;
        }
        #[cfg(not(unix))]
        {
            let _ = (target, mode);
        }
        Ok(())
    }
}

/// Permission bits of an existing path. `None` on platforms without modes.
pub fn current_mode(path: &Path) -> io::Result<Option<u32>> {
    let meta = fs::metadata(path)?;
    #[cfg(unix)]
    {
        Ok(Some(meta.permissions().mode() & constants::MODE_MASK))
    }
    #[cfg(not(unix))]
    {
        let _ = meta;
        Ok(None)
    }
}
