//! Bootstrap launcher for packaged applications.
//!
//! Locates the runtime library an application image should load, checks that
//! a separately installed runtime is compatible with the one the package was
//! built against, and assembles the runtime's startup arguments. The crate is
//! split the same way throughout:
//!
//! - **[`core`]**: Pure, deterministic logic (config records, runtime
//!   resolution, release records, version floors). Filesystem queries go
//!   through a probe trait so everything is testable in memory.
//! - **[`io`]**: Side-effecting operations (config and release files, process
//!   environment, the runtime hand-off seam).
//!
//! Orchestration modules ([`launch`], [`check`]) coordinate core logic with
//! I/O to implement CLI commands.

pub mod check;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod launch;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
