//! Gathers the paths declared by every module.

use crate::constants;
use crate::core::oplog::{OperationLog, Operation};
use crate::core::requirement::{MalformedRequirement, Module, RequirementList};
use crate::models::options::FixerOptions;
use serde::Serialize;
use std::path::PathBuf;

/// A declared path and the module that asked for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredPath {
    pub module: String,
    pub path: PathBuf,
}

/// Everything declared in one run, in module order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathSet {
    pub directories: Vec<RequiredPath>,
    pub files: Vec<RequiredPath>,
}

impl PathSet {
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len()
    }
}

/// Ask each module for its directories and files.
///
/// A malformed accessor value is logged once and only that accessor's
/// contribution is skipped.
pub fn collect(modules: &[&dyn Module], options: &FixerOptions, log: &mut OperationLog) -> PathSet {
    let mut set = PathSet::default();
    for module in modules {
        if let Some(cap) = module.directory_requirement() {
            let result = cap.required_directories(options);
            accept(*module, "required_directories", result, &mut set.directories, log);
        }
        if let Some(cap) = module.file_requirement() {
            let result = cap.required_files(options);
            accept(*module, "required_files", result, &mut set.files, log);
        }
    }
    tracing::debug!(
        directories = set.directories.len(),
        files = set.files.len(),
        "collected module requirements"
    );
    set
}

fn accept(
    module: &dyn Module,
    accessor: &str,
    result: RequirementList,
    into: &mut Vec<RequiredPath>,
    log: &mut OperationLog,
) {
    match result {
        Ok(paths) => into.extend(paths.into_iter().map(|path| RequiredPath {
            module: module.name().to_string(),
            path: PathBuf::from(path),
        })),
        Err(err) => log.log_error(malformed_message(module.name(), accessor, &err), Operation::Collect),
    }
}

fn malformed_message(module: &str, accessor: &str, err: &MalformedRequirement) -> String {
    format!(
        "{}::{}() {} ({})",
        module,
        accessor,
        constants::MALFORMED_SUFFIX,
        err
    )
}
