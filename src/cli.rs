use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "orthoshot")]
#[command(about = "Batch orthographic view renderer", long_about = None)]
pub struct Cli {
    /// glTF or GLB model to render
    pub model: PathBuf,

    /// Directory the view images are written to (must exist)
    #[arg(long = "output-dir", default_value = "output")]
    pub output_dir: PathBuf,
}
