//! Artifact verification: existence, checksum manifest, capability validation
//!
//! The manifest is written before validation runs, so a failing validation
//! still leaves the digest on disk for inspection.

use crate::error::{ForgeError, ForgeResult};
use crate::pipeline::preflight::{tool_available, VALIDATOR_TOOL};
use crate::pipeline::BuildContext;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{info, warn};

/// Digest algorithm prefix recorded in the manifest
const DIGEST_PREFIX: &str = "sha256";

/// Manifest file name, written next to the artifact
pub const MANIFEST_FILE: &str = "checksums.txt";

/// A verified build output
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub digest: String,
}

/// SHA-256 of a file's contents as lowercase hex
pub fn checksum_file(path: &Path) -> ForgeResult<String> {
    let contents = std::fs::read(path)
        .map_err(|e| ForgeError::io(format!("reading artifact {}", path.display()), e))?;

    let mut hasher = Sha256::new();
    hasher.update(&contents);
    Ok(hex::encode(hasher.finalize()))
}

fn manifest_line(digest: &str, file_name: &str) -> String {
    format!("{DIGEST_PREFIX}:{digest}  {file_name}\n")
}

/// Check the artifact exists and record its checksum manifest.
///
/// A missing file is an error even though the optimizer container exited 0:
/// a build that silently produces nothing must not pass.
pub async fn verify_artifact(ctx: &BuildContext) -> ForgeResult<Artifact> {
    let path = ctx.artifact_path();
    if !path.is_file() {
        return Err(ForgeError::ArtifactMissing { path });
    }

    let digest = checksum_file(&path)?;
    let manifest = ctx.artifact_dir.join(MANIFEST_FILE);
    tokio::fs::write(&manifest, manifest_line(&digest, &ctx.artifact_file))
        .await
        .map_err(|e| ForgeError::io(format!("writing manifest {}", manifest.display()), e))?;

    info!("Checksum manifest written to {}", manifest.display());
    Ok(Artifact { path, digest })
}

/// Run the static validator against the fixed capability list.
///
/// Lenient when the validator is unavailable (warn and skip), strict when it
/// is available (any failure aborts the build).
pub async fn validate_capabilities(ctx: &BuildContext, artifact: &Path) -> ForgeResult<()> {
    if !tool_available(VALIDATOR_TOOL).await {
        warn!(
            "{} not installed; skipping capability validation",
            VALIDATOR_TOOL
        );
        return Ok(());
    }

    let caps = ctx.capabilities.join(",");
    info!("Validating against capabilities: {}", caps);

    let status = Command::new(VALIDATOR_TOOL)
        .arg("--available-capabilities")
        .arg(&caps)
        .arg(artifact)
        .status()
        .await
        .map_err(|e| {
            ForgeError::command_failed(format!("{VALIDATOR_TOOL} {}", artifact.display()), e)
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ForgeError::ValidationFailed {
            code: status.code().unwrap_or(-1),
        })
    }
}
