//! Process and environment inputs for a launch.

use std::env;
use std::path::PathBuf;

/// Environment variable that overrides the per-user config root.
pub const USER_CONFIG_ROOT_ENV: &str = "APPDATA";

/// What the launcher knows about the running process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEnv {
    /// Path of the launcher executable.
    pub launcher_path: PathBuf,
    /// Command-line arguments, excluding the program name.
    pub args: Vec<String>,
    /// Root under which per-user launcher configs live, if any.
    pub user_config_root: Option<PathBuf>,
}

impl ProcessEnv {
    /// Build the environment for `launcher_path`, taking the user config root
    /// from the process environment.
    pub fn for_launcher(launcher_path: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            launcher_path: launcher_path.into(),
            args,
            user_config_root: user_config_root(),
        }
    }
}

/// `$APPDATA` when set and non-empty, otherwise the platform config dir.
pub fn user_config_root() -> Option<PathBuf> {
    env::var_os(USER_CONFIG_ROOT_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}
