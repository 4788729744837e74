//! Artifact discovery and collection.
//!
//! Firmware images are found under the port directory by two passes: every
//! `*.bin` file, then the exact binary name (the unix port produces an
//! extension-less executable). Both passes share the same exclusions and
//! their results are concatenated without deduplication.

pub mod copier;
pub mod finder;
pub mod pattern;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;

pub use copier::copy_all;
pub use finder::{find, find_all, Exclusions};
pub use pattern::NamePattern;

/// Glob matching firmware images.
pub const IMAGE_PATTERN: &str = "*.bin";

/// Find all artifacts under `root`: the `*.bin` pass followed by the
/// `binary` pass. A path matching both appears twice.
pub fn collect_artifacts(
    root: &Path,
    binary: &str,
    exclusions: &Exclusions,
) -> Result<Vec<PathBuf>> {
    let patterns = [NamePattern::new(IMAGE_PATTERN)?, NamePattern::new(binary)?];
    Ok(find_all(root, &patterns, exclusions).collect())
}

/// Find artifacts for the configured port and copy them to `dest`.
///
/// Zero artifacts is a valid outcome, not an error.
pub fn copy_artifacts(config: &Config, dest: &Path, binary: &str) -> Result<usize> {
    let root = config.port_path();
    info!("-- Copying Artifacts To {} --", dest.display());
    debug!("Search Path: {}", root.display());
    debug!("Binary Name: {}", binary);

    let exclusions = Exclusions::new(&config.exclusions);
    let artifacts = collect_artifacts(&root, binary, &exclusions)?;

    if artifacts.is_empty() {
        info!("Found 0 artifacts under {}", root.display());
    } else {
        info!("Found {} artifacts:", artifacts.len());
        for path in &artifacts {
            info!("  {}", path.display());
        }
    }

    let copied = copy_all(artifacts, dest)?;
    info!("Done!");
    Ok(copied.len())
}
