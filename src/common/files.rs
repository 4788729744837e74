//! File and directory copies that carry metadata along.

use anyhow::{Context, Result};
use std::fs::{self, File, FileTimes};
use std::path::Path;

/// Copy a single file, preserving permission bits and timestamps.
///
/// `dst` is the full destination file path and is overwritten if present.
pub fn copy_file_with_metadata(src: &Path, dst: &Path) -> Result<()> {
    // fs::copy carries the permission bits over.
    fs::copy(src, dst)
        .with_context(|| format!("Failed to copy {} to {}", src.display(), dst.display()))?;
    copy_times(src, dst)
}

/// Deep-copy a directory tree, preserving file and directory metadata.
///
/// Symlinks are recreated as symlinks rather than followed.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)
        .with_context(|| format!("Failed to create directory {}", dst.display()))?;

    for entry in fs::read_dir(src)
        .with_context(|| format!("Failed to read directory {}", src.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        let dest_path = dst.join(entry.file_name());
        let file_type = entry.file_type()?;

        if file_type.is_symlink() {
            let target = fs::read_link(&path)?;
            std::os::unix::fs::symlink(&target, &dest_path).with_context(|| {
                format!("Failed to create symlink {}", dest_path.display())
            })?;
        } else if file_type.is_dir() {
            copy_dir_recursive(&path, &dest_path)?;
        } else {
            copy_file_with_metadata(&path, &dest_path)?;
        }
    }

    // Children are written, so the directory's own mtime can be restored.
    let meta = fs::metadata(src)?;
    fs::set_permissions(dst, meta.permissions())?;
    copy_times(src, dst)
}

fn copy_times(src: &Path, dst: &Path) -> Result<()> {
    let meta = fs::metadata(src)?;
    let mut times = FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    // Read-only handle: a copied 0o444 file cannot be reopened for writing,
    // and directories can only be opened this way.
    let file = File::open(dst)
        .with_context(|| format!("Failed to open {} to set timestamps", dst.display()))?;
    file.set_times(times)?;
    Ok(())
}
