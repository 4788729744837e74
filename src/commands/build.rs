//! Build command - stages modules, builds the port, collects artifacts.

use anyhow::Result;
use tracing::info;

use crate::artifact;
use crate::build;
use crate::config::Config;
use crate::timing::{run_phase, Phase};

/// Options for the build command.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Copy artifacts to the configured artifacts directory afterwards.
    pub copy: bool,
}

/// Execute the build command.
pub fn cmd_build(config: &Config, options: &BuildOptions) -> Result<()> {
    info!("Building Port!");

    run_phase(Phase::StageModules, || {
        build::stage(&config.extra_modules, &config.modules_path())
    })?;
    run_phase(Phase::BuildPort, || build::build_port(config))?;
    info!("Done!");

    if options.copy {
        run_phase(Phase::CopyArtifacts, || {
            artifact::copy_artifacts(config, &config.artifacts, &config.name)
        })?;
    }
    Ok(())
}
