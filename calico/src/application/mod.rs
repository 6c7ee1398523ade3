pub mod controller;
pub mod handlers;

use crate::config::{self, Config};
use crate::logging::init_logging;
use crate::presentation::cli::{Cli, Commands};
use calico_core::error::Result;
use clap::Parser;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let env_config = config::read_env(std::env::vars())?;
    let file_config = match &cli.config {
        Some(path) => config::read_config_file(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Create {
            files,
            name,
            output_dir,
            deterministic,
            no_overwrite,
        } => {
            // flags only override when given, so file/env values survive
            let cli_config = Config {
                output_dir,
                name,
                deterministic: deterministic.then_some(true),
                overwrite: no_overwrite.then_some(false),
                max_files: None,
            };
            let merged = config::merge_configs(env_config, file_config, cli_config);
            handlers::handle_create(merged, files)
        }
        Commands::List { archive } => handlers::handle_list(archive),
        Commands::Shell { output_dir, name } => {
            let cli_config = Config {
                output_dir,
                name,
                ..Default::default()
            };
            let merged = config::merge_configs(env_config, file_config, cli_config);
            handlers::handle_shell(merged)
        }
    }
}
