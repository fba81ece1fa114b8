//! Runtime library resolution.
//!
//! The runtime directory comes from, in priority order:
//!
//! 1. `runtime` in the `Application` section of the main config;
//! 2. the package's default runtime directory, when it bundles a `lib/` dir;
//! 3. `runtime` in the user config, when the package only ships a `release`
//!    record and expects a separately installed runtime.
//!
//! The library is the first candidate name that exists as a regular file in
//! that directory; candidate order encodes preference.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::trace;

use crate::core::config::{ConfigRecord, PropertyValue, property, section};
use crate::core::probe::PathProbe;
use crate::core::release::RELEASE_FILE;

/// Subdirectory whose presence marks a runtime bundled inside the package.
pub const BUNDLED_LIB_DIR: &str = "lib";

/// Which rule picked the runtime directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuntimeSource {
    MainConfig,
    Bundled,
    UserConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRuntime {
    pub runtime_dir: PathBuf,
    pub source: RuntimeSource,
    pub library: PathBuf,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error(
        "no runtime directory resolvable: package ships {} but the user config sets no `{}` in [{}]",
        .release.display(),
        property::RUNTIME,
        section::APPLICATION
    )]
    NoUserRuntime { release: PathBuf },

    #[error(
        "package has no bundled runtime and no release record in {}",
        .default_dir.display()
    )]
    NoBundledRuntime { default_dir: PathBuf },

    #[error(
        "no matching library file found in runtime directory {} (tried: {})",
        .runtime_dir.display(),
        .candidates.join(", ")
    )]
    LibraryNotFound {
        runtime_dir: PathBuf,
        candidates: Vec<String>,
    },
}

/// Resolve the runtime library path to load.
pub fn resolve_runtime_library<S: AsRef<str>>(
    main: &ConfigRecord,
    user: &ConfigRecord,
    default_runtime_dir: &Path,
    candidate_names: &[S],
    probe: &dyn PathProbe,
) -> Result<PathBuf, ResolutionError> {
    resolve_runtime(main, user, default_runtime_dir, candidate_names, probe)
        .map(|resolved| resolved.library)
}

/// Resolve the runtime directory and library, reporting which rule applied.
pub fn resolve_runtime<S: AsRef<str>>(
    main: &ConfigRecord,
    user: &ConfigRecord,
    default_runtime_dir: &Path,
    candidate_names: &[S],
    probe: &dyn PathProbe,
) -> Result<ResolvedRuntime, ResolutionError> {
    let (runtime_dir, source) = select_runtime_dir(main, user, default_runtime_dir, probe)?;
    let library = find_library(&runtime_dir, candidate_names, probe)?;
    Ok(ResolvedRuntime {
        runtime_dir,
        source,
        library,
    })
}

fn select_runtime_dir(
    main: &ConfigRecord,
    user: &ConfigRecord,
    default_runtime_dir: &Path,
    probe: &dyn PathProbe,
) -> Result<(PathBuf, RuntimeSource), ResolutionError> {
    if let Some(dir) = runtime_property(main) {
        trace!(
            runtime_dir = %dir.display(),
            "`runtime` set in main config, using it"
        );
        return Ok((dir, RuntimeSource::MainConfig));
    }

    if probe.exists(&default_runtime_dir.join(BUNDLED_LIB_DIR)) {
        trace!(
            runtime_dir = %default_runtime_dir.display(),
            "`runtime` not set in main config, using bundled runtime"
        );
        return Ok((default_runtime_dir.to_path_buf(), RuntimeSource::Bundled));
    }

    let release = default_runtime_dir.join(RELEASE_FILE);
    if probe.exists(&release) {
        return match runtime_property(user) {
            Some(dir) => {
                trace!(
                    runtime_dir = %dir.display(),
                    "no bundled runtime, `runtime` set in user config"
                );
                Ok((dir, RuntimeSource::UserConfig))
            }
            None => {
                trace!(release = %release.display(), "no bundled runtime and no user `runtime`");
                Err(ResolutionError::NoUserRuntime { release })
            }
        };
    }

    trace!(
        default_dir = %default_runtime_dir.display(),
        "no bundled runtime and no release record"
    );
    Err(ResolutionError::NoBundledRuntime {
        default_dir: default_runtime_dir.to_path_buf(),
    })
}

fn runtime_property(cfg: &ConfigRecord) -> Option<PathBuf> {
    cfg.property(section::APPLICATION, property::RUNTIME)
        .map(PropertyValue::as_str)
        .map(PathBuf::from)
}

/// Return `runtime_dir/name` for the first candidate that is a regular file.
pub fn find_library<S: AsRef<str>>(
    runtime_dir: &Path,
    candidate_names: &[S],
    probe: &dyn PathProbe,
) -> Result<PathBuf, ResolutionError> {
    for name in candidate_names {
        let path = runtime_dir.join(name.as_ref());
        if probe.is_file(&path) {
            trace!(library = %path.display(), "found runtime library");
            return Ok(path);
        }
        trace!(candidate = %path.display(), "runtime library candidate missing");
    }
    Err(ResolutionError::LibraryNotFound {
        runtime_dir: runtime_dir.to_path_buf(),
        candidates: candidate_names
            .iter()
            .map(|name| name.as_ref().to_string())
            .collect(),
    })
}
