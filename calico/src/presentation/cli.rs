use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Bundle up to 20 files into a .calico archive", long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true, env = "CALICO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Debug-level logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an archive from the given files
    Create {
        /// Files to add, in order (max 20)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output file name; `.calico` is appended if missing
        #[arg(short, long)]
        name: Option<String>,

        /// Folder the archive is saved to (created if absent)
        #[arg(short = 'd', long)]
        output_dir: Option<PathBuf>,

        /// Zero entry timestamps so identical inputs give identical bytes
        #[arg(long)]
        deterministic: bool,

        /// Fail instead of replacing an existing archive
        #[arg(long)]
        no_overwrite: bool,
    },

    /// List the entries of an archive
    List { archive: PathBuf },

    /// Interactive session: add/remove files, set the name, create
    Shell {
        #[arg(short = 'd', long)]
        output_dir: Option<PathBuf>,

        #[arg(short, long)]
        name: Option<String>,
    },
}
