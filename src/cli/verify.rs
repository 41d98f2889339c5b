//! Post-configure verification of required paths.

use crate::cli::CliContext;
use crate::core::collector::{self, RequiredPath};
use crate::core::manifest;
use crate::core::oplog::OperationLog;
use crate::util::fs::{current_mode, LocalFilesystem};
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Only check existence, ignore modes
    #[arg(long)]
    pub skip_modes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Directory,
    File,
}

pub fn run(ctx: &CliContext, args: VerifyArgs) -> Result<()> {
    let manifest = ctx.load_manifest()?;
    let modules = manifest::modules(&manifest);
    let gateway = LocalFilesystem::new(&ctx.paths.root);
    let mut log = OperationLog::new(false);
    let set = collector::collect(&modules, &manifest.options, &mut log);

    let mut passed = 0u32;
    let mut failed = 0u32;

    println!("Verify: {}", ctx.paths);
    for entry in log.errors() {
        println!("  [FAIL] {}", entry.message);
        failed += 1;
    }

    let expected_dir = (!args.skip_modes).then(|| manifest.options.directory_mode());
    let expected_file = (!args.skip_modes).then(|| manifest.options.file_mode());
    let checks = set
        .directories
        .iter()
        .map(|d| (d, Kind::Directory, expected_dir))
        .chain(set.files.iter().map(|f| (f, Kind::File, expected_file)));

    for (required, kind, expected) in checks {
        match check(&gateway, required, kind, expected) {
            Ok(detail) => {
                println!("  [PASS] {}", detail);
                passed += 1;
            }
            Err(detail) => {
                println!("  [FAIL] {}", detail);
                failed += 1;
            }
        }
    }

    println!();
    println!("Verify summary: {} passed, {} failed", passed, failed);
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn check(
    gateway: &LocalFilesystem,
    required: &RequiredPath,
    kind: Kind,
    expected: Option<u32>,
) -> std::result::Result<String, String> {
    let label = format!("{} ({})", required.path.display(), required.module);
    let target = gateway.resolve(&required.path).map_err(|e| e.to_string())?;

    let present = match kind {
        Kind::Directory => target.is_dir(),
        Kind::File => target.is_file(),
    };
    if !present {
        let what = match kind {
            Kind::Directory => "directory",
            Kind::File => "file",
        };
        return Err(format!("{} missing: {}", what, label));
    }

    let Some(expected) = expected else {
        return Ok(format!("exists: {}", label));
    };
    match current_mode(&target) {
        Ok(Some(mode)) if mode == expected => Ok(format!("mode {:04o}: {}", mode, label)),
        Ok(Some(mode)) => Err(format!(
            "mode {:04o} (expected {:04o}): {}",
            mode, expected, label
        )),
        Ok(None) => Ok(format!("exists: {}", label)),
        Err(e) => Err(format!("cannot stat {}: {}", label, e)),
    }
}
