//! Port build workflow: stage extra modules, then run the build tool.

pub mod make;
pub mod modules;

pub use make::{build_command, build_port};
pub use modules::{stage, ModuleEntry};
