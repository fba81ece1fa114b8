//! Bootstrap launcher CLI.
//!
//! Resolves the runtime library for an application image, prints the launch
//! plan, or checks a runtime's release record against a requirement.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use applauncher::check::check_release;
use applauncher::core::release::ReleaseDescriptor;
use applauncher::core::resolver::ResolutionError;
use applauncher::exit_codes;
use applauncher::io::env::ProcessEnv;
use applauncher::io::fs::OsFilesystem;
use applauncher::io::host::PlanPrinter;
use applauncher::launch::{LauncherOptions, build_launch_plan, launch};
use applauncher::logging;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "applauncher",
    version,
    about = "Bootstrap launcher that resolves a packaged or installed runtime"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the runtime library the launcher would load.
    Resolve {
        #[command(flatten)]
        target: LaunchTarget,
    },
    /// Print the full launch plan (library, runtime dir, arguments) as JSON.
    Plan {
        #[command(flatten)]
        target: LaunchTarget,
        /// Pass the trailing arguments straight through instead of building
        /// runtime arguments from the launcher config.
        #[arg(long)]
        cmdline_only: bool,
        /// Application arguments; override `arguments` in [ArgOptions].
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Check an installed runtime's release record against a requirement.
    CheckRelease {
        /// Release record of the installed runtime.
        installed: PathBuf,
        /// Release record holding the required version and modules.
        #[arg(long)]
        required: Option<PathBuf>,
        /// Required minimum version (overrides the one in --required).
        #[arg(long = "min-version")]
        version: Option<String>,
        /// Additional required module (repeatable).
        #[arg(long = "module")]
        modules: Vec<String>,
    },
}

#[derive(clap::Args)]
struct LaunchTarget {
    /// Launcher executable inside the application image (default: this executable).
    #[arg(long)]
    launcher: Option<PathBuf>,
    /// Runtime library file name to try, relative to the runtime dir (repeatable,
    /// in preference order; default: platform names).
    #[arg(long = "library-name")]
    library_names: Vec<String>,
}

impl LaunchTarget {
    fn env(&self, args: Vec<String>) -> Result<ProcessEnv> {
        let launcher = match &self.launcher {
            Some(path) => path.clone(),
            None => std::env::current_exe().context("locate launcher executable")?,
        };
        Ok(ProcessEnv::for_launcher(launcher, args))
    }

    fn options(&self, cmdline_only: bool) -> LauncherOptions {
        let mut options = LauncherOptions {
            cmdline_only,
            ..LauncherOptions::default()
        };
        if !self.library_names.is_empty() {
            options.library_names = self.library_names.clone();
        }
        options
    }
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            if err.downcast_ref::<ResolutionError>().is_some() {
                exit_codes::UNRESOLVED
            } else {
                exit_codes::INVALID
            }
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Resolve { target } => cmd_resolve(&target),
        Command::Plan {
            target,
            cmdline_only,
            args,
        } => cmd_plan(&target, cmdline_only, args),
        Command::CheckRelease {
            installed,
            required,
            version,
            modules,
        } => cmd_check_release(installed, required, version, modules),
    }
}

fn cmd_resolve(target: &LaunchTarget) -> Result<i32> {
    let env = target.env(Vec::new())?;
    let plan = build_launch_plan(&env, &target.options(false), &OsFilesystem)?;
    println!("{}", plan.library.display());
    Ok(exit_codes::OK)
}

fn cmd_plan(target: &LaunchTarget, cmdline_only: bool, args: Vec<String>) -> Result<i32> {
    let env = target.env(args)?;
    launch(&env, &target.options(cmdline_only), &OsFilesystem, &PlanPrinter)
}

fn cmd_check_release(
    installed: PathBuf,
    required: Option<PathBuf>,
    version: Option<String>,
    modules: Vec<String>,
) -> Result<i32> {
    let mut requirement = match required {
        Some(path) => {
            if !path.is_file() {
                bail!("required release record {} not found", path.display());
            }
            ReleaseDescriptor::load(&path)
        }
        None => ReleaseDescriptor::default(),
    };
    if let Some(version) = version {
        requirement = requirement.with_version(version);
    }
    if !modules.is_empty() {
        let mut all = requirement.modules().to_vec();
        all.extend(modules);
        requirement = requirement.with_modules(all);
    }

    let report = check_release(&installed, &requirement);
    println!(
        "installed: version={} modules={}",
        report.installed.version(),
        report.installed.modules().len()
    );
    println!(
        "required: version={} modules={}",
        report.required.version(),
        report.required.modules().len()
    );
    if !report.version_ok {
        println!("version: not satisfied");
    }
    for module in &report.missing_modules {
        println!("missing module: {module}");
    }
    if report.is_satisfied() {
        println!("satisfied");
        Ok(exit_codes::OK)
    } else {
        println!("not satisfied");
        Ok(exit_codes::UNSATISFIED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_resolve_with_library_names() {
        let cli = Cli::parse_from([
            "applauncher",
            "resolve",
            "--launcher",
            "/opt/app/bin/app",
            "--library-name",
            "lib/a.so",
            "--library-name",
            "lib/b.so",
        ]);
        let Command::Resolve { target } = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(target.launcher, Some(PathBuf::from("/opt/app/bin/app")));
        assert_eq!(target.options(false).library_names, vec!["lib/a.so", "lib/b.so"]);
    }

    #[test]
    fn parse_plan_trailing_args() {
        let cli = Cli::parse_from([
            "applauncher",
            "plan",
            "--cmdline-only",
            "--",
            "--verbose",
            "input.txt",
        ]);
        let Command::Plan {
            cmdline_only, args, ..
        } = cli.command
        else {
            panic!("expected plan");
        };
        assert!(cmdline_only);
        assert_eq!(args, vec!["--verbose", "input.txt"]);
    }

    #[test]
    fn default_library_names_when_none_given() {
        let cli = Cli::parse_from(["applauncher", "resolve"]);
        let Command::Resolve { target } = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(
            target.options(true),
            LauncherOptions {
                cmdline_only: true,
                ..LauncherOptions::default()
            }
        );
    }

    #[test]
    fn parse_check_release_modules() {
        let cli = Cli::parse_from([
            "applauncher",
            "check-release",
            "/jdk/release",
            "--min-version",
            "17",
            "--module",
            "java.base",
            "--module",
            "java.sql",
        ]);
        let Command::CheckRelease {
            installed,
            required,
            version,
            modules,
        } = cli.command
        else {
            panic!("expected check-release");
        };
        assert_eq!(installed, PathBuf::from("/jdk/release"));
        assert_eq!(required, None);
        assert_eq!(version.as_deref(), Some("17"));
        assert_eq!(modules, vec!["java.base", "java.sql"]);
    }
}
