//! Dry-run preview of a configure run.

use crate::cli::CliContext;
use crate::core::fixer::PermissionsFixer;
use crate::core::manifest;
use crate::util::fs::LocalFilesystem;
use anyhow::Result;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Output format (text|json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

pub fn run(ctx: &CliContext, args: PlanArgs) -> Result<()> {
    let manifest = ctx.load_manifest()?;
    let modules = manifest::modules(&manifest);

    // The gateway is never called while planning.
    let mut fixer = PermissionsFixer::new(LocalFilesystem::new(&ctx.paths.root));
    let ops = fixer.plan(&manifest.options, &modules);
    let issues: Vec<String> = fixer
        .log()
        .errors()
        .map(|e| e.message.clone())
        .collect();

    if args.format == "json" {
        let plan = serde_json::json!({
            "root": ctx.paths.root.display().to_string(),
            "operations": ops,
            "issues": issues,
        });
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!("Plan: {}", ctx.paths);
    if ops.is_empty() {
        println!("  nothing to do");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Operation").add_attribute(Attribute::Bold),
            Cell::new("Path").add_attribute(Attribute::Bold),
            Cell::new("Module").add_attribute(Attribute::Bold),
            Cell::new("Mode").add_attribute(Attribute::Bold),
        ]);
        for (index, op) in ops.iter().enumerate() {
            table.add_row(vec![
                (index + 1).to_string(),
                op.step.operation().to_string(),
                op.path.display().to_string(),
                op.module.clone(),
                op.step
                    .mode()
                    .map(|m| format!("{:04o}", m))
                    .unwrap_or_else(|| "-".to_string()),
            ]);
        }
        println!("{}", table);
    }
    for issue in &issues {
        println!("  issue: {}", issue);
    }
    println!("\nNo changes made (dry-run).");
    Ok(())
}
