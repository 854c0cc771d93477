use bootmac_installer::ui::validation;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn image_path_requires_existing_file() {
    let temp = tempdir().expect("tempdir");
    let image_path = temp.path().join("Install macOS Sonoma.iso");
    let mut file = File::create(&image_path).expect("create file");
    writeln!(file, "test").expect("write");

    assert!(validation::validate_image_path(&image_path).is_ok());
}

#[test]
fn image_path_rejects_missing_and_directories() {
    let temp = tempdir().expect("tempdir");
    let missing = temp.path().join("missing.iso");
    assert!(validation::validate_image_path(&missing).is_err());
    assert!(validation::validate_image_path(temp.path()).is_err());
    assert!(validation::validate_image_path(Path::new("")).is_err());
}

#[test]
fn output_dir_must_exist() {
    let temp = tempdir().expect("tempdir");
    assert!(validation::validate_output_dir(temp.path()).is_ok());
    let result = validation::validate_output_dir(&temp.path().join("isos"));
    assert!(result.unwrap_err().contains("not found"));
}

#[test]
fn installer_path_must_be_app_bundle() {
    let temp = tempdir().expect("tempdir");
    let bundle = temp.path().join("Install macOS Ventura.app");
    fs::create_dir_all(&bundle).expect("create bundle");
    assert!(validation::validate_installer_path(&bundle).is_ok());

    let folder = temp.path().join("Installers");
    fs::create_dir_all(&folder).expect("create folder");
    assert!(validation::validate_installer_path(&folder).is_err());
    assert!(validation::validate_installer_path(&temp.path().join("Install macOS Ghost.app")).is_err());
}
