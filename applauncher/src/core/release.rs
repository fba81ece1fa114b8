//! Release records: the version and module set an installed runtime declares.
//!
//! A release record is a line-oriented `KEY="value"` text file shipped at the
//! top of a runtime directory. Only the first [`SCANNED_LINES`] lines are read
//! and only two keys matter; anything else is ignored. Missing or malformed
//! entries leave the corresponding field empty instead of failing.

use tracing::{debug, trace};

use crate::core::version::version_at_least;

/// Name of the release record inside a runtime directory.
pub const RELEASE_FILE: &str = "release";
pub const VERSION_KEY: &str = "JAVA_VERSION";
pub const MODULES_KEY: &str = "MODULES";
/// Keys after this many lines are ignored.
pub const SCANNED_LINES: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseDescriptor {
    version: String,
    modules: Vec<String>,
}

impl ReleaseDescriptor {
    pub fn new(version: impl Into<String>, modules: Vec<String>) -> Self {
        Self {
            version: version.into(),
            modules,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_modules(mut self, modules: Vec<String>) -> Self {
        self.modules = modules;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.version.is_empty() && self.modules.is_empty()
    }

    /// Parse release record text.
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// Build a descriptor from release record lines, scanning at most
    /// [`SCANNED_LINES`] of them. A key seen twice keeps its last value.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut descriptor = Self::default();
        for line in lines.into_iter().take(SCANNED_LINES) {
            let line = line.as_ref();
            if let Some(version) = quoted_value(line, VERSION_KEY) {
                descriptor.version = version.to_string();
            } else if let Some(modules) = quoted_value(line, MODULES_KEY) {
                descriptor.modules = modules
                    .split(' ')
                    .filter(|module| !module.is_empty())
                    .map(str::to_string)
                    .collect();
            }
        }
        descriptor
    }

    /// Required modules that this descriptor does not list, in `required` order.
    pub fn missing_modules<'a>(&self, required: &'a ReleaseDescriptor) -> Vec<&'a str> {
        required
            .modules
            .iter()
            .filter(|module| !self.modules.contains(*module))
            .map(String::as_str)
            .collect()
    }

    /// True if this (installed) release meets `required`: the version floor
    /// holds and every required module is present (exact, case-sensitive).
    pub fn satisfies(&self, required: &ReleaseDescriptor) -> bool {
        if !version_at_least(&required.version, &self.version) {
            debug!(
                version = %self.version,
                required = %required.version,
                "release version does not meet required version"
            );
            return false;
        }
        trace!(version = %self.version, required = %required.version, "release version matches");

        let missing = self.missing_modules(required);
        if let Some(first) = missing.first() {
            debug!(module = %first, missing = missing.len(), "release is missing required module");
            return false;
        }
        trace!("all required modules present");
        true
    }
}

/// Value of `KEY="value"` if `line` starts with that key and the quotes close
/// around a non-empty value.
fn quoted_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(key)?.strip_prefix("=\"")?;
    let end = rest.find('"')?;
    if end == 0 {
        return None;
    }
    Some(&rest[..end])
}
