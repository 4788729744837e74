//! Configuration management for micropy-build.
//!
//! Reads configuration from .env file and environment variables.
//! Environment variables take precedence over .env file.

use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Default firmware source tree inside the build container.
pub const DEFAULT_MICROPY_ROOT: &str = "/micropython";
/// Default firmware/binary name.
pub const DEFAULT_NAME: &str = "micropython";
/// Default port the container builds for.
pub const DEFAULT_PORT: &str = "esp32";
/// Default board within the port.
pub const DEFAULT_BOARD: &str = "GENERIC";
/// Default mount point for extra frozen modules.
pub const DEFAULT_EXTRA_MODULES: &str = "/pymodules";
/// Default artifact output directory.
pub const DEFAULT_ARTIFACTS: &str = "/artifacts";
/// Default build program.
pub const DEFAULT_BUILD_TOOL: &str = "make";
/// Default `-j` value passed to the build program.
pub const DEFAULT_BUILD_JOBS: u32 = 4;

/// Path segments that disqualify a file from artifact discovery.
///
/// These are ESP-IDF intermediate outputs (bootloader, partition table,
/// CMake scratch) that also end in `.bin` but are not firmware images.
pub const DEFAULT_EXCLUSIONS: &[&str] = &["CMakeFiles", "bootloader", "partition_table", "esp-idf"];

/// Resolved settings for one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Firmware source tree root (MICROPY_ROOT)
    pub micropy_root: PathBuf,
    /// Firmware/binary name (INPUT_NAME)
    pub name: String,
    /// Target port identifier (INPUT_PORT)
    pub port: String,
    /// Directory holding all ports (INPUT_PORT_ROOT)
    pub port_root: PathBuf,
    /// Board identifier (INPUT_BOARD)
    pub board: String,
    /// Extra modules staging source (EXTRA_MODULES_PATH)
    pub extra_modules: PathBuf,
    /// Default artifact destination (ARTIFACTS_PATH)
    pub artifacts: PathBuf,
    /// Build program (BUILD_TOOL)
    pub build_tool: String,
    /// Parallel build jobs (BUILD_JOBS)
    pub build_jobs: u32,
    /// Path segments excluded from artifact discovery
    pub exclusions: Vec<String>,
}

impl Config {
    /// Load configuration from .env file and environment.
    pub fn load() -> Self {
        // A missing .env is the normal case inside the container.
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars().collect())
    }

    /// Resolve configuration from a key/value mapping, applying defaults.
    ///
    /// Empty values are treated as unset. Never fails.
    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        let micropy_root = get("MICROPY_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MICROPY_ROOT));

        let port_root = get("INPUT_PORT_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|| micropy_root.join("ports"));

        let build_jobs = get("BUILD_JOBS")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|jobs| *jobs > 0)
            .unwrap_or(DEFAULT_BUILD_JOBS);

        Self {
            name: get("INPUT_NAME").unwrap_or(DEFAULT_NAME).to_string(),
            port: get("INPUT_PORT").unwrap_or(DEFAULT_PORT).to_string(),
            board: get("INPUT_BOARD").unwrap_or(DEFAULT_BOARD).to_string(),
            extra_modules: PathBuf::from(get("EXTRA_MODULES_PATH").unwrap_or(DEFAULT_EXTRA_MODULES)),
            artifacts: PathBuf::from(get("ARTIFACTS_PATH").unwrap_or(DEFAULT_ARTIFACTS)),
            build_tool: get("BUILD_TOOL").unwrap_or(DEFAULT_BUILD_TOOL).to_string(),
            build_jobs,
            exclusions: DEFAULT_EXCLUSIONS.iter().map(|s| s.to_string()).collect(),
            micropy_root,
            port_root,
        }
    }

    /// Directory of the port being built. Also the artifact search root.
    pub fn port_path(&self) -> PathBuf {
        self.port_root.join(&self.port)
    }

    /// Where extra modules are staged inside the port tree.
    pub fn modules_path(&self) -> PathBuf {
        self.port_path().join("modules")
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  MICROPY_ROOT: {}", self.micropy_root.display());
        println!("  INPUT_NAME: {}", self.name);
        println!("  INPUT_PORT: {}", self.port);
        println!("  INPUT_PORT_ROOT: {}", self.port_root.display());
        println!("  INPUT_BOARD: {}", self.board);
        println!("  EXTRA_MODULES_PATH: {}", self.extra_modules.display());
        println!("  ARTIFACTS_PATH: {}", self.artifacts.display());
        println!("  BUILD_TOOL: {}", self.build_tool);
        println!("  BUILD_JOBS: {}", self.build_jobs);
        println!("  Search path: {}", self.port_path().display());
        println!("  Exclusions: {}", self.exclusions.join(", "));
        if self.port_path().is_dir() {
            println!("  Port tree: FOUND");
        } else {
            println!("  Port tree: NOT FOUND");
        }
    }
}
