//! Orchestration for a launch: layout → configs → runtime → plan.
//!
//! Builds the [`LaunchPlan`] a [`RuntimeHost`] needs: the runtime library to
//! load and the argument vector for the runtime's startup call.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use serde::Serialize;
use tracing::{debug, info, instrument, trace, warn};

use crate::core::config::{ConfigRecord, PropertyValue, property, section};
use crate::core::layout::{AppLayout, default_library_names};
use crate::core::probe::PathProbe;
use crate::core::release::{RELEASE_FILE, ReleaseDescriptor};
use crate::core::resolver::{RuntimeSource, resolve_runtime};
use crate::io::config_file::{load_config, load_optional_config};
use crate::io::env::ProcessEnv;
use crate::io::host::RuntimeHost;

#[cfg(windows)]
const PATH_LIST_SEPARATOR: &str = ";";
#[cfg(not(windows))]
const PATH_LIST_SEPARATOR: &str = ":";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherOptions {
    /// Pass the command line straight through instead of building runtime
    /// arguments from the config.
    pub cmdline_only: bool,
    /// Runtime library file names to try, most preferred first.
    pub library_names: Vec<String>,
}

impl Default for LauncherOptions {
    fn default() -> Self {
        Self {
            cmdline_only: false,
            library_names: default_library_names(),
        }
    }
}

/// Everything needed to start the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub library: PathBuf,
    pub runtime_dir: PathBuf,
    pub source: RuntimeSource,
    /// For a user-configured runtime: whether its release record satisfies
    /// the one shipped with the package. `None` for other sources.
    pub compatible: Option<bool>,
    /// Startup arguments, beginning with the launcher path.
    pub arguments: Vec<String>,
}

/// Resolve the runtime and assemble the launch plan.
#[instrument(skip_all, fields(launcher = %env.launcher_path.display()))]
pub fn build_launch_plan(
    env: &ProcessEnv,
    options: &LauncherOptions,
    probe: &dyn PathProbe,
) -> Result<LaunchPlan> {
    let layout = AppLayout::from_launcher_path(&env.launcher_path).ok_or_else(|| {
        anyhow!(
            "cannot derive application layout from launcher path {}",
            env.launcher_path.display()
        )
    })?;
    let macros = layout.macros();

    let cfg_path = layout.config_path();
    trace!(path = %cfg_path.display(), "launcher config path");
    let mut main_cfg = load_config(&cfg_path)?.expand_macros(&macros);

    let user_cfg = match &env.user_config_root {
        Some(root) => {
            let user_path = layout.user_config_path(root);
            trace!(path = %user_path.display(), "user config path");
            load_optional_config(&user_path)?.expand_macros(&macros)
        }
        None => ConfigRecord::default(),
    };

    if !env.args.is_empty() {
        debug!(
            count = env.args.len(),
            "overriding configured arguments from command line"
        );
        main_cfg.set_property(
            section::ARG_OPTIONS,
            property::ARGUMENTS,
            PropertyValue::List(env.args.clone()),
        );
    }

    let resolved = resolve_runtime(
        &main_cfg,
        &user_cfg,
        &layout.default_runtime_dir,
        options.library_names.as_slice(),
        probe,
    )?;
    info!(library = %resolved.library.display(), source = ?resolved.source, "resolved runtime");

    let compatible = (resolved.source == RuntimeSource::UserConfig)
        .then(|| installed_runtime_compatible(&layout.default_runtime_dir, &resolved.runtime_dir));

    let mut arguments = vec![env.launcher_path.to_string_lossy().into_owned()];
    if options.cmdline_only {
        arguments.extend(env.args.iter().cloned());
    } else {
        arguments.extend(runtime_arguments(&main_cfg));
    }

    Ok(LaunchPlan {
        library: resolved.library,
        runtime_dir: resolved.runtime_dir,
        source: resolved.source,
        compatible,
        arguments,
    })
}

/// Build the launch plan and hand it to `host`.
pub fn launch(
    env: &ProcessEnv,
    options: &LauncherOptions,
    probe: &dyn PathProbe,
    host: &dyn RuntimeHost,
) -> Result<i32> {
    let plan = build_launch_plan(env, options, probe)?;
    host.launch(&plan)
}

/// Compare the installed runtime's release record with the package's.
///
/// A mismatch is reported but does not block the launch.
fn installed_runtime_compatible(package_runtime_dir: &Path, installed_runtime_dir: &Path) -> bool {
    let required = ReleaseDescriptor::load(&package_runtime_dir.join(RELEASE_FILE));
    let installed = ReleaseDescriptor::load(&installed_runtime_dir.join(RELEASE_FILE));
    let compatible = installed.satisfies(&required);
    if !compatible {
        warn!(
            installed_version = %installed.version(),
            required_version = %required.version(),
            missing_modules = ?installed.missing_modules(&required),
            runtime_dir = %installed_runtime_dir.display(),
            "user-configured runtime does not satisfy the packaged release record"
        );
    }
    compatible
}

/// Runtime startup arguments from config: options, module path, class path,
/// main entry, then application arguments.
pub fn runtime_arguments(cfg: &ConfigRecord) -> Vec<String> {
    let mut args = Vec::new();
    let values = |section_name: &str, name: &str| -> Vec<String> {
        cfg.property(section_name, name)
            .map(|value| value.values().to_vec())
            .unwrap_or_default()
    };

    args.extend(values(section::JAVA_OPTIONS, property::JAVA_OPTIONS));

    let module_path = values(section::APPLICATION, property::MODULE_PATH);
    if !module_path.is_empty() {
        args.push("--module-path".to_string());
        args.push(module_path.join(PATH_LIST_SEPARATOR));
    }

    let class_path = values(section::APPLICATION, property::CLASS_PATH);
    if !class_path.is_empty() {
        args.push(format!(
            "-Djava.class.path={}",
            class_path.join(PATH_LIST_SEPARATOR)
        ));
    }

    if let Some(module) = cfg.property(section::APPLICATION, property::MAIN_MODULE) {
        args.push("-m".to_string());
        args.push(module.as_str().to_string());
    } else if let Some(class) = cfg.property(section::APPLICATION, property::MAIN_CLASS) {
        args.push(class.as_str().to_string());
    }

    args.extend(values(section::ARG_OPTIONS, property::ARGUMENTS));
    args
}
