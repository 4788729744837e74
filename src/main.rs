//! micropy-build - build-container entrypoint for MicroPython ports.
//!
//! Stages extra frozen modules into the port tree, runs the port build,
//! and harvests firmware artifacts into an output directory.

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use micropy_build::commands::{self, BuildOptions, CopyOptions};
use micropy_build::config::Config;

#[derive(Parser)]
#[command(name = "micropy-build")]
#[command(about = "Micropy-Build Docker Entrypoint.", version)]
#[command(
    after_help = "CONFIGURATION (environment or .env):\n  INPUT_NAME, INPUT_PORT, INPUT_PORT_ROOT, INPUT_BOARD,\n  MICROPY_ROOT, EXTRA_MODULES_PATH, ARTIFACTS_PATH, BUILD_TOOL, BUILD_JOBS"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy build artifacts
    Copy {
        /// Path to copy artifacts to [default: ARTIFACTS_PATH]
        #[arg(short, long)]
        dest: Option<PathBuf>,

        /// Name of binary executable to look for [default: INPUT_NAME]
        #[arg(short, long)]
        binary: Option<String>,
    },

    /// Rebuild a port
    Build {
        /// Perform copy after building
        #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
        copy: bool,
    },

    /// Show the resolved configuration
    Config {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load();

    match cli.command {
        Some(Commands::Copy { dest, binary }) => {
            let options = CopyOptions {
                dest: dest.unwrap_or_else(|| config.artifacts.clone()),
                binary: binary.unwrap_or_else(|| config.name.clone()),
            };
            commands::cmd_copy(&config, &options)?;
        }

        Some(Commands::Build { copy }) => {
            commands::cmd_build(&config, &BuildOptions { copy })?;
        }

        Some(Commands::Config { json }) => {
            commands::cmd_config(&config, json)?;
        }

        None => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}
