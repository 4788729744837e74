//! Extra frozen module staging.
//!
//! Every direct child of the extra-modules directory is copied into the
//! port's `modules/` directory so the build freezes it into the firmware.
//! An existing destination with the same name is removed first: staging
//! replaces, it never merges.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::common::{copy_dir_recursive, copy_file_with_metadata, remove_if_exists};

/// One staged source and where it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl ModuleEntry {
    fn new(source: PathBuf, dest_root: &Path) -> Option<Self> {
        let dest = dest_root.join(source.file_name()?);
        Some(Self { source, dest })
    }

    /// Replace `dest` with a fresh copy of `source`.
    fn stage(&self) -> Result<()> {
        remove_if_exists(&self.dest)?;
        if self.source.is_dir() {
            copy_dir_recursive(&self.source, &self.dest)
        } else {
            copy_file_with_metadata(&self.source, &self.dest)
        }
    }
}

/// Stage every entry of `source_dir` into `dest_root`.
///
/// A missing `source_dir` is a configuration error. Entries are processed
/// in directory order.
pub fn stage(source_dir: &Path, dest_root: &Path) -> Result<Vec<ModuleEntry>> {
    if !source_dir.is_dir() {
        bail!(
            "Extra modules directory not found: {}\n\
             Mount it into the container or set EXTRA_MODULES_PATH.",
            source_dir.display()
        );
    }

    fs::create_dir_all(dest_root)
        .with_context(|| format!("Failed to create modules directory {}", dest_root.display()))?;

    let mut staged = Vec::new();
    for entry in fs::read_dir(source_dir)
        .with_context(|| format!("Failed to read {}", source_dir.display()))?
    {
        let entry = entry?;
        let Some(module) = ModuleEntry::new(entry.path(), dest_root) else {
            continue;
        };
        info!(
            "Copying: {} => {}",
            entry.file_name().to_string_lossy(),
            module.dest.display()
        );
        module.stage()?;
        staged.push(module);
    }

    info!("Extra frozen modules copied! ({} entries)", staged.len());
    Ok(staged)
}
