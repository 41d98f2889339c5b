//! Project root and manifest resolution.

use crate::constants;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub manifest: PathBuf,
}

impl ProjectPaths {
    /// Resolve the root from CLI arg, env var, or the nearest ancestor holding
    /// a manifest, falling back to the current directory.
    pub fn resolve(root_arg: Option<PathBuf>, manifest_arg: Option<PathBuf>) -> Result<Self> {
        let root = match root_arg {
            Some(root) => root,
            None => match env::var_os(constants::ROOT_ENV) {
                Some(root) => PathBuf::from(root),
                None => {
                    let cwd = env::current_dir().context("resolve current directory")?;
                    find_project_root(&cwd).unwrap_or(cwd)
                }
            },
        };
        let root = absolute(root)?;
        let mut paths = Self::from_root(root);
        if let Some(manifest) = manifest_arg {
            paths.manifest = manifest;
        }
        Ok(paths)
    }

    pub fn from_root(root: PathBuf) -> Self {
        let manifest = root.join(constants::MANIFEST_FILE_NAME);
        Self { root, manifest }
    }
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = env::current_dir().context("resolve current directory")?;
    Ok(cwd.join(path))
}

fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(constants::MANIFEST_FILE_NAME).is_file())
        .map(Path::to_path_buf)
}

impl std::fmt::Display for ProjectPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "project@{}", self.root.display())
    }
}
