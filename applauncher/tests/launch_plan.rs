//! End-to-end launch plan assembly over on-disk application images.
//!
//! Each test lays out an image in a temp dir (launcher, app dir, configs,
//! runtimes) and drives `build_launch_plan` / `launch` with the real
//! filesystem probe.

use applauncher::core::resolver::{ResolutionError, RuntimeSource};
use applauncher::io::fs::OsFilesystem;
use applauncher::launch::{LauncherOptions, build_launch_plan, launch};
use applauncher::test_support::{PackageFixture, RecordingHost, release_text};

const LIBRARY: &str = "lib/libfake.so";

fn options() -> LauncherOptions {
    LauncherOptions {
        cmdline_only: false,
        library_names: vec!["lib/missing.so".to_string(), LIBRARY.to_string()],
    }
}

#[test]
fn bundled_runtime_plan_uses_config_arguments() {
    let pkg = PackageFixture::new("demo").expect("fixture");
    pkg.bundle_runtime(&[LIBRARY]).expect("runtime");
    pkg.write_config(
        r#"
[Application]
main-class = "com.example.Main"

[JavaOptions]
java-options = ["-Dapp.dir=$APPDIR"]

[ArgOptions]
arguments = ["--from-config"]
"#,
    )
    .expect("config");

    let plan = build_launch_plan(&pkg.env(&[]), &options(), &OsFilesystem).expect("plan");

    assert_eq!(plan.source, RuntimeSource::Bundled);
    assert_eq!(plan.runtime_dir, pkg.layout.default_runtime_dir);
    assert_eq!(plan.library, pkg.layout.default_runtime_dir.join(LIBRARY));
    assert_eq!(plan.compatible, None);
    assert_eq!(
        plan.arguments,
        vec![
            pkg.layout.launcher_path.to_string_lossy().into_owned(),
            format!("-Dapp.dir={}", pkg.layout.app_dir.display()),
            "com.example.Main".to_string(),
            "--from-config".to_string(),
        ]
    );
}

#[test]
fn command_line_arguments_replace_configured_ones() {
    let pkg = PackageFixture::new("demo").expect("fixture");
    pkg.bundle_runtime(&[LIBRARY]).expect("runtime");
    pkg.write_config(
        "[Application]\nmain-class = \"com.example.Main\"\n\n[ArgOptions]\narguments = [\"--from-config\"]\n",
    )
    .expect("config");

    let plan = build_launch_plan(&pkg.env(&["one", "two"]), &options(), &OsFilesystem)
        .expect("plan");

    assert_eq!(&plan.arguments[1..], &["com.example.Main", "one", "two"]);
}

#[test]
fn cmdline_only_skips_config_arguments() {
    let pkg = PackageFixture::new("demo").expect("fixture");
    pkg.bundle_runtime(&[LIBRARY]).expect("runtime");
    pkg.write_config("[Application]\nmain-class = \"com.example.Main\"\n")
        .expect("config");

    let options = LauncherOptions {
        cmdline_only: true,
        ..options()
    };
    let plan = build_launch_plan(&pkg.env(&["-cp", "x.jar", "Main"]), &options, &OsFilesystem)
        .expect("plan");

    assert_eq!(&plan.arguments[1..], &["-cp", "x.jar", "Main"]);
}

#[test]
fn main_config_runtime_is_macro_expanded() {
    let pkg = PackageFixture::new("demo").expect("fixture");
    pkg.bundle_runtime(&[LIBRARY]).expect("bundled runtime");
    let custom = pkg.layout.root_dir.join("custom-runtime");
    applauncher::test_support::write_file(&custom.join(LIBRARY), "").expect("library");
    pkg.write_config("[Application]\nruntime = \"$ROOTDIR/custom-runtime\"\n")
        .expect("config");

    let plan = build_launch_plan(&pkg.env(&[]), &options(), &OsFilesystem).expect("plan");

    assert_eq!(plan.source, RuntimeSource::MainConfig);
    assert_eq!(
        plan.runtime_dir.to_string_lossy(),
        format!("{}/custom-runtime", pkg.layout.root_dir.display())
    );
    assert!(plan.library.ends_with(LIBRARY));
}

#[test]
fn release_only_package_uses_compatible_user_runtime() {
    let pkg = PackageFixture::new("demo").expect("fixture");
    pkg.ship_release_only(&release_text("17.0.1", &["java.base", "java.sql"]))
        .expect("release");
    let installed = pkg
        .install_runtime(
            "jdk-17",
            &release_text("17.0.8", &["java.base", "java.sql", "java.xml"]),
            &[LIBRARY],
        )
        .expect("installed runtime");
    pkg.write_config("").expect("config");
    pkg.write_user_config(&format!("[Application]\nruntime = '{}'\n", installed.display()))
        .expect("user config");

    let plan = build_launch_plan(&pkg.env(&[]), &options(), &OsFilesystem).expect("plan");

    assert_eq!(plan.source, RuntimeSource::UserConfig);
    assert_eq!(plan.runtime_dir, installed);
    assert_eq!(plan.library, installed.join(LIBRARY));
    assert_eq!(plan.compatible, Some(true));
}

#[test]
fn incompatible_user_runtime_is_reported_not_fatal() {
    let pkg = PackageFixture::new("demo").expect("fixture");
    pkg.ship_release_only(&release_text("17.0.1", &["java.base", "java.sql"]))
        .expect("release");
    let installed = pkg
        .install_runtime("jdk-11", &release_text("11.0.20", &["java.base"]), &[LIBRARY])
        .expect("installed runtime");
    pkg.write_config("").expect("config");
    pkg.write_user_config(&format!("[Application]\nruntime = '{}'\n", installed.display()))
        .expect("user config");

    let plan = build_launch_plan(&pkg.env(&[]), &options(), &OsFilesystem).expect("plan");

    assert_eq!(plan.library, installed.join(LIBRARY));
    assert_eq!(plan.compatible, Some(false));
}

#[test]
fn release_only_package_without_user_config_fails_to_resolve() {
    let pkg = PackageFixture::new("demo").expect("fixture");
    pkg.ship_release_only(&release_text("17", &["java.base"]))
        .expect("release");
    pkg.write_config("").expect("config");

    let err = build_launch_plan(&pkg.env(&[]), &options(), &OsFilesystem).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ResolutionError>(),
        Some(ResolutionError::NoUserRuntime { .. })
    ));
}

#[test]
fn missing_main_config_is_an_error() {
    let pkg = PackageFixture::new("demo").expect("fixture");
    pkg.bundle_runtime(&[LIBRARY]).expect("runtime");

    let err = build_launch_plan(&pkg.env(&[]), &options(), &OsFilesystem).unwrap_err();
    assert!(format!("{err:#}").contains("demo.cfg"));
    assert!(err.downcast_ref::<ResolutionError>().is_none());
}

#[test]
fn launch_hands_plan_to_host() {
    let pkg = PackageFixture::new("demo").expect("fixture");
    pkg.bundle_runtime(&[LIBRARY]).expect("runtime");
    pkg.write_config("").expect("config");
    let host = RecordingHost::new(7);

    let code = launch(&pkg.env(&["arg"]), &options(), &OsFilesystem, &host).expect("launch");

    assert_eq!(code, 7);
    let plans = host.plans.borrow();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].library, pkg.layout.default_runtime_dir.join(LIBRARY));
    assert_eq!(plans[0].arguments.last().map(String::as_str), Some("arg"));
}
