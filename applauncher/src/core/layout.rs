//! Package image layout derived from the launcher executable path.

use std::path::{Path, PathBuf};

use crate::core::config::{Macros, placeholder};

/// Where the launcher, application files, and default runtime live within an
/// application image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppLayout {
    pub launcher_path: PathBuf,
    /// Launcher file name without extension; names the config files.
    pub launcher_name: String,
    pub bin_dir: PathBuf,
    pub root_dir: PathBuf,
    pub app_dir: PathBuf,
    pub default_runtime_dir: PathBuf,
}

impl AppLayout {
    /// Derive the layout from the launcher's own path.
    ///
    /// Returns `None` when the path has no file name or is too shallow to
    /// contain an image root.
    pub fn from_launcher_path(launcher_path: &Path) -> Option<Self> {
        let launcher_name = launcher_path.file_stem()?.to_str()?.to_string();
        let bin_dir = launcher_path.parent()?.to_path_buf();
        let root_dir = platform::root_dir(&bin_dir)?;
        Some(Self {
            launcher_path: launcher_path.to_path_buf(),
            launcher_name,
            app_dir: root_dir.join(platform::APP_DIR),
            default_runtime_dir: root_dir.join(platform::RUNTIME_DIR),
            bin_dir,
            root_dir,
        })
    }

    /// Path of the launcher named `launcher_name` inside an image rooted at `root_dir`.
    pub fn launcher_path_in(root_dir: &Path, launcher_name: &str) -> PathBuf {
        root_dir
            .join(platform::LAUNCHER_DIR)
            .join(format!("{launcher_name}{}", std::env::consts::EXE_SUFFIX))
    }

    /// Main launcher config: `<app dir>/<launcher name>.cfg`.
    pub fn config_path(&self) -> PathBuf {
        self.app_dir.join(format!("{}.cfg", self.launcher_name))
    }

    /// User override config: `<user root>/<launcher name>/<launcher name>.cfg`.
    pub fn user_config_path(&self, user_config_root: &Path) -> PathBuf {
        user_config_root
            .join(&self.launcher_name)
            .join(format!("{}.cfg", self.launcher_name))
    }

    /// `$APPDIR`, `$BINDIR` and `$ROOTDIR` for config expansion.
    pub fn macros(&self) -> Macros {
        Macros::from([
            (
                placeholder::APP_DIR.to_string(),
                self.app_dir.to_string_lossy().into_owned(),
            ),
            (
                placeholder::BIN_DIR.to_string(),
                self.bin_dir.to_string_lossy().into_owned(),
            ),
            (
                placeholder::ROOT_DIR.to_string(),
                self.root_dir.to_string_lossy().into_owned(),
            ),
        ])
    }
}

/// Runtime library file names to try, most preferred first.
pub fn default_library_names() -> Vec<String> {
    platform::LIBRARY_NAMES
        .iter()
        .map(|name| name.to_string())
        .collect()
}

#[cfg(target_os = "windows")]
mod platform {
    use std::path::{Path, PathBuf};

    pub const LAUNCHER_DIR: &str = "";
    pub const APP_DIR: &str = "app";
    pub const RUNTIME_DIR: &str = "runtime";
    pub const LIBRARY_NAMES: &[&str] = &["bin\\jli.dll", "bin\\server\\jvm.dll"];

    pub fn root_dir(bin_dir: &Path) -> Option<PathBuf> {
        Some(bin_dir.to_path_buf())
    }
}

#[cfg(target_os = "macos")]
mod platform {
    use std::path::{Path, PathBuf};

    pub const LAUNCHER_DIR: &str = "MacOS";
    pub const APP_DIR: &str = "app";
    pub const RUNTIME_DIR: &str = "runtime/Contents/Home";
    pub const LIBRARY_NAMES: &[&str] = &["lib/libjli.dylib", "lib/jli/libjli.dylib"];

    pub fn root_dir(bin_dir: &Path) -> Option<PathBuf> {
        bin_dir.parent().map(Path::to_path_buf)
    }
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
mod platform {
    use std::path::{Path, PathBuf};

    pub const LAUNCHER_DIR: &str = "bin";
    pub const APP_DIR: &str = "lib/app";
    pub const RUNTIME_DIR: &str = "lib/runtime";
    pub const LIBRARY_NAMES: &[&str] = &["lib/libjli.so", "lib/jli/libjli.so"];

    pub fn root_dir(bin_dir: &Path) -> Option<PathBuf> {
        bin_dir.parent().map(Path::to_path_buf)
    }
}
