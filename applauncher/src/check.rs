//! Standalone release compatibility check for `applauncher check-release`.

use std::path::Path;

use tracing::instrument;

use crate::core::release::ReleaseDescriptor;
use crate::core::version::version_at_least;

/// Outcome of checking an installed release against a requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub installed: ReleaseDescriptor,
    pub required: ReleaseDescriptor,
    pub version_ok: bool,
    pub missing_modules: Vec<String>,
}

impl CheckReport {
    pub fn is_satisfied(&self) -> bool {
        self.version_ok && self.missing_modules.is_empty()
    }
}

/// Load the release record at `installed_path` and check it against `required`.
#[instrument(skip(required), fields(installed = %installed_path.display()))]
pub fn check_release(installed_path: &Path, required: &ReleaseDescriptor) -> CheckReport {
    let installed = ReleaseDescriptor::load(installed_path);
    check_descriptor(installed, required)
}

pub fn check_descriptor(installed: ReleaseDescriptor, required: &ReleaseDescriptor) -> CheckReport {
    let version_ok = version_at_least(required.version(), installed.version());
    let missing_modules = installed
        .missing_modules(required)
        .into_iter()
        .map(str::to_string)
        .collect();
    CheckReport {
        installed,
        required: required.clone(),
        version_ok,
        missing_modules,
    }
}
