use crate::cli::CliContext;
use crate::core::requirement::{Module, RequirementList};
use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, Table};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(ctx: &CliContext, args: ListArgs) -> Result<()> {
    let manifest = ctx.load_manifest()?;
    let options = &manifest.options;

    if args.json {
        let items: Vec<_> = manifest
            .modules
            .iter()
            .map(|m| {
                serde_json::json!({
                    "name": m.name(),
                    "directories": m.directory_requirement().map(|c| summarize(c.required_directories(options))),
                    "files": m.file_requirement().map(|c| summarize(c.required_files(options))),
                })
            })
            .collect();
        let json = serde_json::to_string_pretty(&items).context("serialize list")?;
        println!("{}", json);
        return Ok(());
    }

    if manifest.modules.is_empty() {
        println!("No modules declared in {}", ctx.paths.manifest.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Module").add_attribute(Attribute::Bold),
        Cell::new("Directories").add_attribute(Attribute::Bold),
        Cell::new("Files").add_attribute(Attribute::Bold),
    ]);
    for module in &manifest.modules {
        let dirs = module
            .directory_requirement()
            .map(|c| c.required_directories(options));
        let files = module.file_requirement().map(|c| c.required_files(options));
        table.add_row(vec![
            Cell::new(module.name()),
            count_cell(dirs),
            count_cell(files),
        ]);
    }
    println!("{}", table);
    Ok(())
}

fn summarize(list: RequirementList) -> serde_json::Value {
    match list {
        Ok(paths) => serde_json::json!(paths),
        Err(e) => serde_json::json!({ "error": e.to_string() }),
    }
}

fn count_cell(list: Option<RequirementList>) -> Cell {
    match list {
        None => Cell::new("-"),
        Some(Ok(paths)) => Cell::new(paths.len()),
        Some(Err(e)) => Cell::new(format!("malformed: {}", e)).fg(Color::Red),
    }
}
