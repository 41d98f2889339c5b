//! Fakes shared by the unit tests.

use crate::core::oplog::Operation;
use crate::core::requirement::{
    MalformedRequirement, Module, RequireDirectoryPermission, RequireFilePermission,
    RequirementList,
};
use crate::models::options::FixerOptions;
use crate::util::fs::{FsError, Filesystem};
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub operation: Operation,
    pub path: PathBuf,
    pub mode: Option<u32>,
}

/// Records every call and fails the ones registered with [`fail_on`].
#[derive(Debug, Default)]
pub struct FakeFilesystem {
    calls: RefCell<Vec<Call>>,
    faults: Vec<(Operation, PathBuf, String)>,
}

impl FakeFilesystem {
    pub fn fail_on(mut self, operation: Operation, path: &str, message: &str) -> Self {
        self.faults
            .push((operation, PathBuf::from(path), message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn paths_for(&self, operation: Operation) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.operation == operation)
            .map(|c| c.path.display().to_string())
            .collect()
    }

    fn record(&self, operation: Operation, path: &Path, mode: Option<u32>) -> Option<io::Error> {
        self.calls.borrow_mut().push(Call {
            operation,
            path: path.to_path_buf(),
            mode,
        });
        self.faults
            .iter()
            .find(|(op, p, _)| *op == operation && p == path)
            .map(|(_, _, message)| io::Error::other(message.clone()))
    }
}

impl Filesystem for FakeFilesystem {
    fn create_dir(&self, path: &Path) -> Result<(), FsError> {
        match self.record(Operation::Mkdir, path, None) {
            Some(source) => Err(FsError::CreateDir {
                path: path.to_path_buf(),
                source,
            }),
            None => Ok(()),
        }
    }

    fn create_file(&self, path: &Path) -> Result<(), FsError> {
        match self.record(Operation::Touch, path, None) {
            Some(source) => Err(FsError::CreateFile {
                path: path.to_path_buf(),
                source,
            }),
            None => Ok(()),
        }
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<(), FsError> {
        match self.record(Operation::Chmod, path, Some(mode)) {
            Some(source) => Err(FsError::SetPermissions {
                path: path.to_path_buf(),
                mode,
                source,
            }),
            None => Ok(()),
        }
    }
}

/// Module with canned accessor results. `None` means the capability is absent.
pub struct StaticModule {
    pub name: String,
    pub directories: Option<RequirementList>,
    pub files: Option<RequirementList>,
}

impl StaticModule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            directories: None,
            files: None,
        }
    }

    pub fn dirs(mut self, paths: &[&str]) -> Self {
        self.directories = Some(Ok(paths.iter().map(|p| p.to_string()).collect()));
        self
    }

    pub fn files(mut self, paths: &[&str]) -> Self {
        self.files = Some(Ok(paths.iter().map(|p| p.to_string()).collect()));
        self
    }

    /// Both accessors return a bare string instead of a list.
    pub fn broken(mut self) -> Self {
        self.directories = Some(Err(MalformedRequirement::NotAnArray {
            found: "string \"foo\"".into(),
        }));
        self.files = Some(Err(MalformedRequirement::NotAnArray {
            found: "string \"bar\"".into(),
        }));
        self
    }
}

impl RequireDirectoryPermission for StaticModule {
    fn required_directories(&self, _: &FixerOptions) -> RequirementList {
        self.directories.clone().unwrap_or_else(|| Ok(Vec::new()))
    }
}

impl RequireFilePermission for StaticModule {
    fn required_files(&self, _: &FixerOptions) -> RequirementList {
        self.files.clone().unwrap_or_else(|| Ok(Vec::new()))
    }
}

impl Module for StaticModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn directory_requirement(&self) -> Option<&dyn RequireDirectoryPermission> {
        self.directories.as_ref().map(|_| self as &dyn RequireDirectoryPermission)
    }

    fn file_requirement(&self) -> Option<&dyn RequireFilePermission> {
        self.files.as_ref().map(|_| self as &dyn RequireFilePermission)
    }
}
