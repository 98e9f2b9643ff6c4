//! CLI command implementations.

pub mod config;
pub mod curve;
pub mod info;
pub mod process;
