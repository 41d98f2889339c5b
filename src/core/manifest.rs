//! Loading and saving `permissions.toml`.

use crate::core::requirement::{
    paths_from_value, Module, RequireDirectoryPermission, RequireFilePermission, RequirementList,
};
use crate::models::manifest::{ManifestFile, ModuleEntry};
use crate::models::options::FixerOptions;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

pub fn load(path: &Path) -> Result<ManifestFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read manifest {}", path.display()))?;
    parse(&content).with_context(|| format!("parse manifest {}", path.display()))
}

pub fn parse(content: &str) -> Result<ManifestFile> {
    let manifest: ManifestFile = toml::from_str(content)?;
    Ok(manifest)
}

/// Write the manifest next to its final location and move it into place.
///
/// Without `overwrite` an existing manifest is left untouched and reported.
pub fn write(path: &Path, manifest: &ManifestFile, overwrite: bool) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("create manifest dir {}", dir.display()))?;

    let body = toml::to_string_pretty(manifest).context("render manifest as TOML")?;
    let mut staged = tempfile::Builder::new()
        .prefix(".permissions")
        .suffix(".toml")
        .tempfile_in(dir)
        .with_context(|| format!("stage manifest in {}", dir.display()))?;
    staged
        .write_all(body.as_bytes())
        .context("write staged manifest")?;

    #[cfg(unix)]
    {
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .context("set manifest mode")?;
    }

    if overwrite {
        staged
            .persist(path)
            .map_err(|e| anyhow!("replace manifest {}: {}", path.display(), e.error))?;
    } else {
        staged.persist_noclobber(path).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                anyhow!("{} already exists (use --force to overwrite)", path.display())
            } else {
                anyhow!("create manifest {}: {}", path.display(), e.error)
            }
        })?;
    }
    Ok(())
}

/// Borrow the manifest's modules as fixer input.
pub fn modules(manifest: &ManifestFile) -> Vec<&dyn Module> {
    manifest.modules.iter().map(|m| m as &dyn Module).collect()
}

/// Manifest written by `init`.
pub fn starter() -> ManifestFile {
    let strings = |paths: &[&str]| {
        toml::Value::Array(
            paths
                .iter()
                .map(|p| toml::Value::String(p.to_string()))
                .collect(),
        )
    };
    ManifestFile {
        options: FixerOptions::default(),
        modules: vec![ModuleEntry {
            name: "Core".to_string(),
            directories: Some(strings(&["public/static", "var/cache"])),
            files: Some(strings(&["var/log/app.log"])),
        }],
    }
}

impl RequireDirectoryPermission for ModuleEntry {
    fn required_directories(&self, _options: &FixerOptions) -> RequirementList {
        match &self.directories {
            Some(value) => paths_from_value(value),
            None => Ok(Vec::new()),
        }
    }
}

impl RequireFilePermission for ModuleEntry {
    fn required_files(&self, _options: &FixerOptions) -> RequirementList {
        match &self.files {
            Some(value) => paths_from_value(value),
            None => Ok(Vec::new()),
        }
    }
}

impl Module for ModuleEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn directory_requirement(&self) -> Option<&dyn RequireDirectoryPermission> {
        self.directories
            .as_ref()
            .map(|_| self as &dyn RequireDirectoryPermission)
    }

    fn file_requirement(&self) -> Option<&dyn RequireFilePermission> {
        self.files.as_ref().map(|_| self as &dyn RequireFilePermission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::requirement::MalformedRequirement;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[options]
mode = "0770"
file_mode = "0660"

[[modules]]
name = "Core"
directories = ["public/static/Core", "var/cache"]
files = ["var/log/core.log"]

[[modules]]
name = "Jobs"
files = ["var/log/jobs.log"]

[[modules]]
name = "Broken"
directories = "foo"
"#;

    #[test]
    fn test_parse_sample() {
        let manifest = parse(SAMPLE).unwrap();
        assert_eq!(manifest.options.mode, 0o770);
        assert_eq!(manifest.options.file_mode(), 0o660);
        assert_eq!(manifest.modules.len(), 3);

        let core = &manifest.modules[0];
        assert_eq!(
            core.required_directories(&manifest.options).unwrap(),
            vec!["public/static/Core", "var/cache"]
        );
    }

    #[test]
    fn test_capabilities_follow_declared_keys() {
        let manifest = parse(SAMPLE).unwrap();
        let jobs = &manifest.modules[1];
        assert!(jobs.directory_requirement().is_none());
        assert!(jobs.file_requirement().is_some());

        let broken = &manifest.modules[2];
        let err = broken
            .directory_requirement()
            .unwrap()
            .required_directories(&manifest.options)
            .unwrap_err();
        assert!(matches!(err, MalformedRequirement::NotAnArray { .. }));
        assert!(broken.file_requirement().is_none());
    }

    #[test]
    fn test_empty_manifest_uses_defaults() {
        let manifest = parse("").unwrap();
        assert!(manifest.modules.is_empty());
        assert_eq!(manifest.options, FixerOptions::default());
    }

    #[test]
    fn test_bad_mode_is_fatal() {
        assert!(parse("[options]\nmode = \"rwx\"\n").is_err());
    }

    #[test]
    fn test_write_then_load_starter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("permissions.toml");
        write(&path, &starter(), false).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.modules.len(), 1);
        assert_eq!(loaded.modules[0].name, "Core");
        assert_eq!(loaded.options.mode, 0o775);
    }

    #[test]
    fn test_write_keeps_existing_manifest_unless_overwriting() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("permissions.toml");
        fs::write(&path, "[[modules]]\nname = \"Mine\"\n").unwrap();

        let err = write(&path, &starter(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(load(&path).unwrap().modules[0].name, "Mine");

        write(&path, &starter(), true).unwrap();
        assert_eq!(load(&path).unwrap().modules[0].name, "Core");

        // no staged files left behind
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.toml"));
    }
}
