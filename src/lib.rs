//! micropy-build library exports.
//!
//! The binary is a thin dispatcher over these modules; integration tests
//! drive them directly.

pub mod artifact;
pub mod build;
pub mod commands;
pub mod common;
pub mod config;
pub mod process;
pub mod timing;
