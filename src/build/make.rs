//! Port build via the native build tool.

use anyhow::{bail, Result};
use tracing::debug;

use crate::config::Config;
use crate::process::{self, Cmd};

/// Build command for the configured port and board.
///
/// `<tool> -j<N> -C <port_path> BOARD=<board> TARGET=app`
pub fn build_command(config: &Config) -> Cmd {
    Cmd::new(&config.build_tool)
        .arg(format!("-j{}", config.build_jobs))
        .arg("-C")
        .arg_path(&config.port_path())
        .arg(format!("BOARD={}", config.board))
        .arg("TARGET=app")
        .error_msg(format!(
            "Build of port '{}' (board {}) failed",
            config.port, config.board
        ))
}

/// Build the port. Any non-zero exit from the build tool is fatal.
pub fn build_port(config: &Config) -> Result<()> {
    match process::which(&config.build_tool) {
        Some(path) => debug!("Build tool: {}", path.display()),
        None => bail!(
            "Build tool '{}' not found in PATH. Set BUILD_TOOL to override.",
            config.build_tool
        ),
    }

    build_command(config).run_interactive()?;
    Ok(())
}
