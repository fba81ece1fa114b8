//! Test-only helpers: an in-memory filesystem probe, on-disk application
//! image fixtures, and a host that records launch plans.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::layout::AppLayout;
use crate::core::probe::PathProbe;
use crate::core::release::RELEASE_FILE;
use crate::io::env::ProcessEnv;
use crate::io::host::RuntimeHost;
use crate::launch::LaunchPlan;

/// In-memory [`PathProbe`]. Parents of registered files count as existing.
#[derive(Debug, Clone, Default)]
pub struct FakeFilesystem {
    files: BTreeSet<PathBuf>,
    dirs: BTreeSet<PathBuf>,
}

impl FakeFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }
}

impl PathProbe for FakeFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains(path)
            || self.dirs.contains(path)
            || self
                .files
                .iter()
                .chain(&self.dirs)
                .any(|known| known.starts_with(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }
}

/// Render release record text with the given version and modules.
pub fn release_text(version: &str, modules: &[&str]) -> String {
    format!(
        "IMPLEMENTOR=\"Test\"\nJAVA_VERSION=\"{version}\"\nMODULES=\"{}\"\n",
        modules.join(" ")
    )
}

/// An application image in a temp directory, laid out for the host platform.
pub struct PackageFixture {
    temp: TempDir,
    pub layout: AppLayout,
}

impl PackageFixture {
    /// Create an image with a launcher named `launcher_name` and an empty
    /// app dir. No config or runtime is written.
    pub fn new(launcher_name: &str) -> Result<Self> {
        let temp = tempfile::tempdir().context("create temp dir")?;
        let root = temp.path().join("image");
        let launcher = AppLayout::launcher_path_in(&root, launcher_name);
        write_file(&launcher, "")?;
        let layout = AppLayout::from_launcher_path(&launcher).context("derive layout")?;
        fs::create_dir_all(&layout.app_dir)
            .with_context(|| format!("create {}", layout.app_dir.display()))?;
        Ok(Self { temp, layout })
    }

    /// Scratch directory outside the image.
    pub fn scratch_dir(&self) -> PathBuf {
        self.temp.path().join("scratch")
    }

    /// Per-user config root used by [`PackageFixture::env`].
    pub fn user_config_root(&self) -> PathBuf {
        self.temp.path().join("user-config")
    }

    pub fn write_config(&self, contents: &str) -> Result<PathBuf> {
        let path = self.layout.config_path();
        write_file(&path, contents)?;
        Ok(path)
    }

    pub fn write_user_config(&self, contents: &str) -> Result<PathBuf> {
        let path = self.layout.user_config_path(&self.user_config_root());
        write_file(&path, contents)?;
        Ok(path)
    }

    /// Bundle a runtime: `lib/` plus the given library files under the
    /// default runtime dir.
    pub fn bundle_runtime(&self, library_names: &[&str]) -> Result<()> {
        let runtime = &self.layout.default_runtime_dir;
        fs::create_dir_all(runtime.join("lib"))
            .with_context(|| format!("create {}", runtime.display()))?;
        for name in library_names {
            write_file(&runtime.join(name), "")?;
        }
        Ok(())
    }

    /// Ship only a release record in the default runtime dir.
    pub fn ship_release_only(&self, release: &str) -> Result<()> {
        write_file(&self.layout.default_runtime_dir.join(RELEASE_FILE), release)
    }

    /// Create a runtime outside the image with a release record and libraries.
    pub fn install_runtime(&self, name: &str, release: &str, library_names: &[&str]) -> Result<PathBuf> {
        let dir = self.scratch_dir().join(name);
        write_file(&dir.join(RELEASE_FILE), release)?;
        for library in library_names {
            write_file(&dir.join(library), "")?;
        }
        Ok(dir)
    }

    /// Process environment for this image's launcher.
    pub fn env(&self, args: &[&str]) -> ProcessEnv {
        ProcessEnv {
            launcher_path: self.layout.launcher_path.clone(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            user_config_root: Some(self.user_config_root()),
        }
    }
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

/// Host that records every plan it is asked to launch.
pub struct RecordingHost {
    pub exit_code: i32,
    pub plans: RefCell<Vec<LaunchPlan>>,
}

impl RecordingHost {
    pub fn new(exit_code: i32) -> Self {
        Self {
            exit_code,
            plans: RefCell::new(Vec::new()),
        }
    }
}

impl RuntimeHost for RecordingHost {
    fn launch(&self, plan: &LaunchPlan) -> Result<i32> {
        self.plans.borrow_mut().push(plan.clone());
        Ok(self.exit_code)
    }
}
