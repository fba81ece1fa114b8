//! Read-only filesystem queries used by resolution.

use std::path::Path;

/// Existence checks the resolver needs from the filesystem.
///
/// Implementations must be safe to share across threads for reads.
pub trait PathProbe {
    /// True if anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// True if `path` exists and is a regular file.
    fn is_file(&self, path: &Path) -> bool;
}
