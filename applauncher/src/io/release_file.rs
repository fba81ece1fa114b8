//! Loading release records from a runtime directory.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::core::release::{ReleaseDescriptor, SCANNED_LINES};

impl ReleaseDescriptor {
    /// Read the release record at `path`.
    ///
    /// Never fails: an unreadable file yields an empty descriptor, and reading
    /// stops at the first line that is not valid UTF-8.
    pub fn load(path: &Path) -> Self {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                debug!(path = %path.display(), %err, "release record unreadable");
                return Self::default();
            }
        };
        let lines = BufReader::new(file)
            .lines()
            .take(SCANNED_LINES)
            .map_while(Result::ok);
        let release = Self::from_lines(lines);
        debug!(
            path = %path.display(),
            version = %release.version(),
            modules = release.modules().len(),
            "loaded release record"
        );
        release
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn load_reads_keys_from_first_lines() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("release");
        fs::write(
            &path,
            "JAVA_VERSION=\"17.0.1\"\r\nMODULES=\"java.base java.desktop\"\r\nOS_ARCH=\"x86_64\"\r\n",
        )
        .expect("write");

        let release = ReleaseDescriptor::load(&path);
        assert_eq!(release.version(), "17.0.1");
        assert_eq!(
            release.modules(),
            &["java.base".to_string(), "java.desktop".to_string()]
        );
    }

    #[test]
    fn load_ignores_keys_past_scanned_lines() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("release");
        let mut text = "\n".repeat(SCANNED_LINES);
        text.push_str("JAVA_VERSION=\"17.0.1\"\nMODULES=\"java.base java.desktop\"\n");
        fs::write(&path, text).expect("write");

        assert!(ReleaseDescriptor::load(&path).is_empty());
    }

    #[test]
    fn load_missing_file_is_empty_and_unsatisfying() {
        let temp = tempfile::tempdir().expect("tempdir");
        let release = ReleaseDescriptor::load(&temp.path().join("missing"));
        assert!(release.is_empty());

        let required = ReleaseDescriptor::new("11", vec!["java.base".to_string()]);
        assert!(!release.satisfies(&required));
    }
}
