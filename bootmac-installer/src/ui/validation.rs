//! Input validation guard rails for user-provided paths.

use std::path::Path;

pub fn validate_image_path(path: &Path) -> Result<(), String> {
    if path.as_os_str().is_empty() {
        return Err("Image path is required.".to_string());
    }
    if !path.exists() {
        return Err(format!("Image file not found: {}", path.display()));
    }
    if !path.is_file() {
        return Err(format!("Image path is not a file: {}", path.display()));
    }
    Ok(())
}

pub fn validate_output_dir(path: &Path) -> Result<(), String> {
    if path.as_os_str().is_empty() {
        return Err("Output directory is required.".to_string());
    }
    if !path.is_dir() {
        return Err(format!("Output directory not found: {}", path.display()));
    }
    Ok(())
}

/// Installer bundles are `.app` directories.
pub fn validate_installer_path(path: &Path) -> Result<(), String> {
    if path.as_os_str().is_empty() {
        return Err("Installer path is required.".to_string());
    }
    if !path.is_dir() {
        return Err(format!("Installer application not found: {}", path.display()));
    }
    if path.extension().and_then(|ext| ext.to_str()) != Some("app") {
        return Err(format!(
            "Installer path is not an application bundle (.app): {}",
            path.display()
        ));
    }
    Ok(())
}
