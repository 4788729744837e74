//! Copy discovered artifacts into an output directory.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::common::{copy_file_with_metadata, ensure_dir_exists};

/// Copy every match into `dest`, keyed by base name.
///
/// Creates `dest` (and parents) first. A later match with the same base
/// name overwrites an earlier one. The first failed copy aborts the rest.
/// Returns the destination path written for each match, in order.
pub fn copy_all<I>(matches: I, dest: &Path) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = PathBuf>,
{
    ensure_dir_exists(dest)?;

    let mut copied = Vec::new();
    for src in matches {
        let name = src
            .file_name()
            .with_context(|| format!("Artifact has no file name: {}", src.display()))?;
        let target = dest.join(name);
        copy_file_with_metadata(&src, &target)?;
        info!(
            "[Copied] {} ==> {}",
            name.to_string_lossy(),
            target.display()
        );
        copied.push(target);
    }
    Ok(copied)
}
