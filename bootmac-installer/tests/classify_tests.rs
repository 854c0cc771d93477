use bootmac_core::cli::Command;
use bootmac_core::config::Config;
use bootmac_core::errors::BootmacError;
use bootmac_core::installer::{HELPER_TOOL, INSTALL_INFO, SHARED_SUPPORT_DIR, SHARED_SUPPORT_IMAGE};
use bootmac_hal::{FakeHal, FakeResponse, PLIST_BUDDY};
use bootmac_installer::dispatch;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn bundle(root: &Path, name: &str, markers: &[&str]) -> PathBuf {
    let bundle = root.join(name);
    fs::create_dir_all(bundle.join(SHARED_SUPPORT_DIR)).expect("shared support");
    for marker in markers {
        let path = bundle.join(marker);
        fs::create_dir_all(path.parent().expect("parent")).expect("marker dir");
        fs::write(path, b"").expect("marker");
    }
    bundle
}

fn run(hal: &FakeHal, command: Command, cfg: &Config) -> (anyhow::Result<()>, String) {
    let mut out = Vec::new();
    let result = dispatch(hal, &command, cfg, Cursor::new(Vec::new()), &mut out);
    (result, String::from_utf8(out).expect("utf8"))
}

#[test]
fn classify_json_report() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let app = bundle(
        tmp.path(),
        "Install macOS Sonoma.app",
        &[HELPER_TOOL, SHARED_SUPPORT_IMAGE],
    );
    let hal = FakeHal::new();
    hal.respond(
        PLIST_BUDDY,
        &[],
        FakeResponse::success("Install macOS Sonoma\n"),
    );

    let (result, out) = run(
        &hal,
        Command::Classify {
            bundle: app.clone(),
            json: true,
        },
        &Config::default(),
    );
    result.expect("classify");

    let value: serde_json::Value = serde_json::from_str(&out).expect("json");
    assert_eq!(value["installer_type"], "BigSurAndLater");
    assert_eq!(value["display_name"], "Install macOS Sonoma");
    assert_eq!(value["known_name"], true);
    assert_eq!(value["requires_privilege"], true);
    assert_eq!(value["path"], app.display().to_string());
}

#[test]
fn classify_unknown_is_reported_not_an_error() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let hal = FakeHal::new();
    let (result, out) = run(
        &hal,
        Command::Classify {
            bundle: tmp.path().join("Xcode.app"),
            json: false,
        },
        &Config::default(),
    );
    result.expect("classify");
    assert!(out.contains("type:          unknown"));
    assert_eq!(hal.operation_count(), 0);
}

#[test]
fn discover_lists_generations() {
    let tmp = tempfile::tempdir().expect("tempdir");
    bundle(tmp.path(), "Install OS X El Capitan.app", &[HELPER_TOOL]);
    bundle(tmp.path(), "Install macOS Mojave.app", &[HELPER_TOOL, INSTALL_INFO]);
    let cfg = Config {
        installers_dir: tmp.path().to_path_buf(),
        ..Config::default()
    };

    let (result, out) = run(&FakeHal::new(), Command::Discover { dir: None }, &cfg);
    result.expect("discover");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("OS X Mavericks - El Capitan"));
    assert!(lines[1].starts_with("macOS Sierra - Catalina"));
}

#[test]
fn build_sierra_without_root_runs_nothing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let app = bundle(
        tmp.path(),
        "Install macOS Sierra.app",
        &[HELPER_TOOL, INSTALL_INFO],
    );
    let cfg = Config {
        installer: Some(app),
        output_dir: Some(tmp.path().to_path_buf()),
        patch_sierra: true,
        ..Config::default()
    };
    let hal = FakeHal::new();

    let (result, _) = run(
        &hal,
        Command::Build {
            installer: None,
            output_dir: None,
            iso_name: None,
            patch_sierra: false,
            replace_code_signatures: false,
            build_tool: None,
        },
        &cfg,
    );
    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BootmacError>(),
        Some(BootmacError::PrivilegeRequired(_))
    ));
    assert_eq!(hal.operation_count(), 0);
}

#[test]
fn build_passes_flags_to_build_tool() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let app = bundle(
        tmp.path(),
        "Install macOS Sierra.app",
        &[HELPER_TOOL, INSTALL_INFO],
    );
    let out_dir = tmp.path().join("isos");
    fs::create_dir_all(&out_dir).expect("out dir");
    fs::write(out_dir.join("Install macOS Sierra.iso"), b"iso").expect("artifact");
    let cfg = Config {
        installer: Some(app),
        output_dir: Some(out_dir.clone()),
        iso_name: Some("sierra".to_string()),
        patch_sierra: true,
        ..Config::default()
    };
    let hal = FakeHal::elevated();

    let (result, out) = run(
        &hal,
        Command::Build {
            installer: None,
            output_dir: None,
            iso_name: None,
            patch_sierra: false,
            replace_code_signatures: false,
            build_tool: None,
        },
        &cfg,
    );
    result.expect("build");
    assert!(hal.has_operation(|op| {
        op.program() == "macos-iso-builder"
            && op.args().iter().any(|a| a == "--patchsierrainstaller")
            && !op.args().iter().any(|a| a == "--replacecodesignatures")
    }));
    assert!(out_dir.join("sierra.iso").is_file());
    assert!(out.contains("sierra.iso"));
}
