use anyhow::Result;
use clap::Parser;

use orthoshot::cli::Cli;
use orthoshot::render_views;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let written = render_views(&cli.model, &cli.output_dir)?;

    println!("All {} views rendered successfully.", written.len());
    Ok(())
}
