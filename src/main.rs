use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = permfix::cli::Cli::parse();
    permfix::cli::init_tracing(cli.verbose)?;
    cli.run()
}
