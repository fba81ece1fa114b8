//! Deterministic, pure logic shared by the launcher.
//!
//! Core modules must be free of I/O side effects. Filesystem lookups go
//! through [`probe::PathProbe`] so resolution stays testable in memory.

pub mod config;
pub mod layout;
pub mod probe;
pub mod release;
pub mod resolver;
pub mod version;
