//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `build` - Stage modules, build the port, copy artifacts
//! - `copy` - Copy artifacts from an existing build
//! - `show` - Display the resolved configuration

pub mod build;
pub mod copy;
pub mod show;

pub use build::{cmd_build, BuildOptions};
pub use copy::{cmd_copy, CopyOptions};
pub use show::cmd_config;
