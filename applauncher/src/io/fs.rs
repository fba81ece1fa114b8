//! [`PathProbe`] backed by the real filesystem.

use std::path::Path;

use crate::core::probe::PathProbe;

/// Stateless probe over `std::fs` metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl PathProbe for OsFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
