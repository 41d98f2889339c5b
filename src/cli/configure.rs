use crate::cli::CliContext;
use crate::core::event::{dispatch, ActivateEvent, ConfigureEvent, Event};
use crate::core::fixer::PermissionsFixer;
use crate::core::manifest;
use crate::core::oplog::{Level, LogEntry};
use crate::util::fs::LocalFilesystem;
use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, Table};

#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// Output format (text|json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

pub fn run(ctx: &CliContext, args: ConfigureArgs) -> Result<()> {
    let manifest = ctx.load_manifest()?;
    let modules = manifest::modules(&manifest);
    let module_count = modules.len();

    let mut fixer = PermissionsFixer::new(LocalFilesystem::new(&ctx.paths.root));
    dispatch(
        &mut [&mut fixer],
        &Event::Activate(ActivateEvent::new(ctx.paths.root.clone(), ctx.verbose)),
    );
    dispatch(
        &mut [&mut fixer],
        &Event::Configure(ConfigureEvent::new(modules, manifest.options)),
    );

    let root = fixer.filesystem().root().display().to_string();
    let failures = fixer.log().error_count();
    let entries = fixer.log_mut().take();

    if args.format == "json" {
        let report = serde_json::json!({
            "root": root,
            "modules": module_count,
            "failures": failures,
            "entries": entries,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serialize report")?
        );
        return Ok(());
    }

    if !entries.is_empty() {
        println!("{}", entry_table(&entries));
    }
    if failures == 0 {
        println!(
            "Fixed permissions for {} module(s) in {}",
            module_count, root
        );
    } else {
        println!(
            "Fixed permissions for {} module(s) in {} with {} failure(s)",
            module_count, root, failures
        );
    }
    Ok(())
}

fn entry_table(entries: &[LogEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Level").add_attribute(Attribute::Bold),
        Cell::new("Operation").add_attribute(Attribute::Bold),
        Cell::new("Message").add_attribute(Attribute::Bold),
    ]);
    for entry in entries {
        let level = match entry.level {
            Level::Info => Cell::new("info").fg(Color::Green),
            Level::Error => Cell::new("error").fg(Color::Red),
        };
        table.add_row(vec![
            level,
            Cell::new(entry.operation),
            Cell::new(&entry.message),
        ]);
    }
    table
}
