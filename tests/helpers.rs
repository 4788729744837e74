//! Shared test utilities for micropy-build tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use micropy_build::config::Config;

/// Test environment laid out like the build container.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Firmware source tree (stands in for /micropython)
    pub micropy_root: PathBuf,
    /// Extra modules mount (stands in for /pymodules)
    pub pymodules: PathBuf,
    /// Artifact output (stands in for /artifacts)
    pub artifacts: PathBuf,
}

impl TestEnv {
    /// Create a new test environment with an empty esp32 port tree.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let micropy_root = base.join("micropython");
        let pymodules = base.join("pymodules");
        let artifacts = base.join("artifacts");

        fs::create_dir_all(micropy_root.join("ports/esp32/modules"))
            .expect("Failed to create port dir");
        fs::create_dir_all(&pymodules).expect("Failed to create pymodules dir");

        Self {
            _temp_dir: temp_dir,
            micropy_root,
            pymodules,
            artifacts,
        }
    }

    /// Base directory of the environment.
    pub fn base(&self) -> &Path {
        self._temp_dir.path()
    }

    /// The esp32 port directory (artifact search root).
    pub fn port_path(&self) -> PathBuf {
        self.micropy_root.join("ports/esp32")
    }

    /// Environment variables pointing the tool at this environment.
    pub fn vars(&self) -> Vec<(String, String)> {
        vec![
            ("MICROPY_ROOT".into(), self.micropy_root.display().to_string()),
            ("EXTRA_MODULES_PATH".into(), self.pymodules.display().to_string()),
            ("ARTIFACTS_PATH".into(), self.artifacts.display().to_string()),
            ("INPUT_NAME".into(), "micropython".into()),
            ("INPUT_PORT".into(), "esp32".into()),
            ("INPUT_BOARD".into(), "GENERIC".into()),
            ("INPUT_PORT_ROOT".into(), String::new()),
            ("BUILD_TOOL".into(), "make".into()),
            ("BUILD_JOBS".into(), "4".into()),
        ]
    }

    /// Resolved configuration for this environment.
    pub fn config(&self) -> Config {
        Config::from_vars(self.vars().into_iter().collect::<HashMap<_, _>>())
    }

    /// Write a file under the port directory.
    pub fn port_file(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.port_path().join(rel), content)
    }

    /// Write a file under the extra modules directory.
    pub fn module_file(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.pymodules.join(rel), content)
    }

    /// Create an executable shell script standing in for the build tool.
    pub fn fake_build_tool(&self, body: &str) -> PathBuf {
        let path = self.base().join("fake-make");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("Failed to write fake tool");
        let mut perms = fs::metadata(&path).expect("Failed to get metadata").permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).expect("Failed to set permissions");
        path
    }
}

/// Write a file, creating parents.
pub fn write_file(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, content).expect("Failed to write file");
    path.to_path_buf()
}

/// Sorted file names directly inside `dir`.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| e.expect("bad entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Assert that a file exists.
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "Expected file to exist: {}", path.display());
}

/// Assert that a file does not exist.
pub fn assert_file_absent(path: &Path) {
    assert!(!path.exists(), "Expected file to be absent: {}", path.display());
}
