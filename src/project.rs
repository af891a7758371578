//! Contract project inspection
//!
//! The optimizer names its output after the contract crate, so the package
//! name is read from the project root `Cargo.toml`. Nothing else in the
//! manifest matters here.

use crate::error::{ForgeError, ForgeResult};
use std::path::Path;

/// Name of the contract package, read from the project root Cargo.toml
pub fn package_name(project_dir: &Path) -> ForgeResult<String> {
    let manifest = project_dir.join("Cargo.toml");
    let content = std::fs::read_to_string(&manifest).map_err(|e| ForgeError::ProjectInvalid {
        path: project_dir.to_path_buf(),
        reason: format!("no readable Cargo.toml: {e}"),
    })?;

    let value: toml::Value = toml::from_str(&content).map_err(|e| ForgeError::ProjectInvalid {
        path: project_dir.to_path_buf(),
        reason: format!("Cargo.toml: {e}"),
    })?;

    value
        .get("package")
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
        .map(str::to_string)
        .ok_or_else(|| ForgeError::ProjectInvalid {
            path: project_dir.to_path_buf(),
            reason: "Cargo.toml has no [package].name".to_string(),
        })
}

/// Artifact file name the optimizer produces for a package
pub fn artifact_file(package: &str) -> String {
    format!("{}.wasm", package.replace('-', "_"))
}

/// Build cache volume name derived from the project directory name
pub fn default_build_volume(project_dir: &Path) -> String {
    let base = project_dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("contract");
    let sanitized: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{sanitized}_cache")
}
