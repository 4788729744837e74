//! Copy command - collects artifacts from an existing build tree.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::artifact;
use crate::config::Config;

/// Options for the copy command.
#[derive(Debug, Clone)]
pub struct CopyOptions {
    /// Destination directory.
    pub dest: PathBuf,
    /// Exact name of the firmware executable to collect alongside `*.bin`.
    pub binary: String,
}

/// Execute the copy command.
pub fn cmd_copy(config: &Config, options: &CopyOptions) -> Result<()> {
    let dest = std::path::absolute(&options.dest)
        .with_context(|| format!("Invalid destination {}", options.dest.display()))?;
    artifact::copy_artifacts(config, &dest, &options.binary)?;
    Ok(())
}
