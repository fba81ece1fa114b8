//! Stable exit codes for applauncher CLI commands.

/// Command succeeded; for `check-release`, the release is satisfied.
pub const OK: i32 = 0;
/// Invalid input, unreadable config, or any other error.
pub const INVALID: i32 = 1;
/// No runtime directory or runtime library could be resolved.
pub const UNRESOLVED: i32 = 2;
/// `check-release`: the installed release does not satisfy the requirement.
pub const UNSATISFIED: i32 = 3;
