use crate::cli::CliContext;
use crate::core::manifest;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing manifest
    #[arg(long)]
    pub force: bool,
}

pub fn run(ctx: &CliContext, args: InitArgs) -> Result<()> {
    let path = &ctx.paths.manifest;
    let mut starter = manifest::starter();
    if let Some(mode) = ctx.mode_override {
        starter.options.mode = mode;
    }
    manifest::write(path, &starter, args.force)?;

    println!("manifest written to {}", path.display());
    println!("Edit the module list, then run: permfix plan");
    Ok(())
}
