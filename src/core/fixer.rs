//! Permission reconciliation.
//!
//! Directories are created first, then files, and modes are applied only
//! once every path exists: directories first, then files, each list in
//! declaration order. A failing step is logged and the run moves on.

use crate::core::collector::{self, PathSet};
use crate::core::event::{ActivateEvent, ConfigureEvent, Subscriber};
use crate::core::oplog::{OperationLog, Operation};
use crate::core::requirement::Module;
use crate::models::options::FixerOptions;
use crate::util::fs::Filesystem;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// What a planned operation does. Only chmod carries a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum Step {
    Mkdir,
    Touch,
    Chmod { mode: u32 },
}

impl Step {
    pub fn operation(&self) -> Operation {
        match self {
            Step::Mkdir => Operation::Mkdir,
            Step::Touch => Operation::Touch,
            Step::Chmod { .. } => Operation::Chmod,
        }
    }

    pub fn mode(&self) -> Option<u32> {
        match self {
            Step::Chmod { mode } => Some(*mode),
            Step::Mkdir | Step::Touch => None,
        }
    }
}

/// One step of a run, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedOperation {
    #[serde(flatten)]
    pub step: Step,
    pub path: PathBuf,
    pub module: String,
}

/// Order the collected paths into mkdir, touch, then chmod steps.
pub fn plan_operations(set: &PathSet, options: &FixerOptions) -> Vec<PlannedOperation> {
    let planned = |step, required: &collector::RequiredPath| PlannedOperation {
        step,
        path: required.path.clone(),
        module: required.module.clone(),
    };
    let dir_chmod = Step::Chmod {
        mode: options.directory_mode(),
    };
    let file_chmod = Step::Chmod {
        mode: options.file_mode(),
    };

    let mut ops = Vec::with_capacity(set.len() * 2);
    ops.extend(set.directories.iter().map(|d| planned(Step::Mkdir, d)));
    ops.extend(set.files.iter().map(|f| planned(Step::Touch, f)));
    ops.extend(set.directories.iter().map(|d| planned(dir_chmod, d)));
    ops.extend(set.files.iter().map(|f| planned(file_chmod, f)));
    ops
}

pub struct PermissionsFixer<F: Filesystem> {
    filesystem: F,
    log: OperationLog,
}

impl<F: Filesystem> PermissionsFixer<F> {
    pub fn new(filesystem: F) -> Self {
        Self {
            filesystem,
            log: OperationLog::default(),
        }
    }

    pub fn filesystem(&self) -> &F {
        &self.filesystem
    }

    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut OperationLog {
        &mut self.log
    }

    pub fn mkdir(&mut self, path: &Path) {
        match self.filesystem.create_dir(path) {
            Ok(()) => self
                .log
                .log(format!("mkdir: {}", path.display()), Operation::Mkdir),
            Err(e) => self.log.log_error(e.to_string(), Operation::Mkdir),
        }
    }

    pub fn touch(&mut self, path: &Path) {
        match self.filesystem.create_file(path) {
            Ok(()) => self
                .log
                .log(format!("touch: {}", path.display()), Operation::Touch),
            Err(e) => self.log.log_error(e.to_string(), Operation::Touch),
        }
    }

    pub fn chmod(&mut self, path: &Path, mode: u32) {
        match self.filesystem.set_permissions(path, mode) {
            Ok(()) => self.log.log(
                format!("chmod: {} with {:04o}", path.display(), mode),
                Operation::Chmod,
            ),
            Err(e) => self.log.log_error(e.to_string(), Operation::Chmod),
        }
    }

    /// Collect and order the work without touching the filesystem.
    pub fn plan(&mut self, options: &FixerOptions, modules: &[&dyn Module]) -> Vec<PlannedOperation> {
        let set = collector::collect(modules, options, &mut self.log);
        plan_operations(&set, options)
    }

    pub fn fix(&mut self, options: &FixerOptions, modules: &[&dyn Module]) {
        for op in self.plan(options, modules) {
            match op.step {
                Step::Mkdir => self.mkdir(&op.path),
                Step::Touch => self.touch(&op.path),
                Step::Chmod { mode } => self.chmod(&op.path, mode),
            }
        }
    }

    /// Run a full fix and report the outcome. Never fails.
    pub fn reconcile(&mut self, options: &FixerOptions, modules: &[&dyn Module]) {
        let before = self.log.error_count();
        self.fix(options, modules);
        let failures = self.log.error_count() - before;
        if failures == 0 {
            tracing::info!(modules = modules.len(), "permissions fixed");
        } else {
            tracing::warn!(
                modules = modules.len(),
                failures,
                "permissions fixed with failures"
            );
        }
    }
}

impl<F: Filesystem> Subscriber for PermissionsFixer<F> {
    fn on_activate(&mut self, event: &ActivateEvent) {
        tracing::debug!(root = %event.root().display(), verbose = event.verbose(), "fixer activated");
        self.log.set_verbose(event.verbose());
    }

    fn on_configure(&mut self, event: &ConfigureEvent<'_>) {
        self.reconcile(event.options(), event.modules());
    }
}
