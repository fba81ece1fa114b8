//! I/O helpers for launcher commands.

pub mod config_file;
pub mod env;
pub mod fs;
pub mod host;
pub mod release_file;
